//! `casedesk verify` command - Record count and case type breakdown

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_store, render_structured, render_table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{verify, VerificationReport};

#[derive(clap::Args, Debug)]
pub struct VerifyArgs {}

pub fn run(_args: VerifyArgs, global: &GlobalOpts) -> Result<()> {
    let (_config, store) = open_store(global)?;
    let report = verify(&store).into_diagnostic()?;
    print_verification(&report, global.format)
}

/// Print a verification report in the requested format
pub fn print_verification(report: &VerificationReport, format: OutputFormat) -> Result<()> {
    if let Some(out) = render_structured(report, format)? {
        println!("{}", out);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = report
        .by_type
        .iter()
        .map(|t| vec![t.case_type.clone(), t.count.to_string()])
        .collect();

    if format == OutputFormat::Auto {
        println!("{}", style("Database verification").bold());
        println!("  Total cases: {}", style(report.total).cyan());
        if rows.is_empty() {
            return Ok(());
        }
        println!();
        println!("{}", style("Case type distribution").bold());
    }

    println!("{}", render_table(&["Case type", "Count"], &rows, format));
    Ok(())
}
