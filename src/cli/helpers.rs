//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{CaseStore, Config};

/// Load the layered config and apply global CLI overrides
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    let mut config = Config::load().into_diagnostic()?;
    if let Some(ref db) = global.db {
        config.database = db.clone();
    }
    Ok(config)
}

/// Store handle for the configured database
pub fn open_store(global: &GlobalOpts) -> Result<(Config, CaseStore)> {
    let config = load_config(global)?;
    let store = CaseStore::new(&config.database);
    Ok((config, store))
}

/// Serialize a value in one of the structured output formats
///
/// Returns `None` for formats that need command-specific rendering.
pub fn render_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(Some)
            .into_diagnostic(),
        OutputFormat::Yaml => serde_yml::to_string(value).map(Some).into_diagnostic(),
        _ => Ok(None),
    }
}

/// Render rows as a table in the requested format
pub fn render_table(headers: &[&str], rows: &[Vec<String>], format: OutputFormat) -> String {
    if format == OutputFormat::Tsv {
        let mut out = headers.join("\t");
        out.push('\n');
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| escape_tsv(c)).collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        return out;
    }

    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());
    for row in rows {
        builder.push_record(row.iter().map(String::as_str));
    }

    let mut table = builder.build();
    if format == OutputFormat::Md {
        table.with(Style::markdown());
    } else {
        table.with(Style::rounded());
    }
    table.to_string()
}

/// Replace characters that would break a TSV row
pub fn escape_tsv(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

/// Render an optional text field for display
pub fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}
