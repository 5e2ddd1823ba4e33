//! `casedesk list` command - List stored cases

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_store, or_dash, render_structured, render_table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::format_date;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only cases whose type contains this text (case-insensitive)
    #[arg(long = "type", short = 't')]
    pub case_type: Option<String>,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_config, store) = open_store(global)?;
    let filter = args
        .case_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let cases = store.list_cases(filter).into_diagnostic()?;

    if let Some(out) = render_structured(&cases, global.format)? {
        println!("{}", out);
        return Ok(());
    }

    if cases.is_empty() {
        if !global.quiet {
            println!("{} No cases found", style("ℹ").blue());
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = cases
        .iter()
        .map(|c| {
            vec![
                c.key().to_string(),
                c.petitioner.clone(),
                c.respondent.clone(),
                or_dash(c.status.as_deref()),
                format_date(c.next_hearing.as_deref()),
            ]
        })
        .collect();

    println!(
        "{}",
        render_table(
            &["Case", "Petitioner", "Respondent", "Status", "Next hearing"],
            &rows,
            global.format,
        )
    );

    if global.format == OutputFormat::Auto && !global.quiet {
        println!("{} case(s) found", style(cases.len()).cyan());
    }
    Ok(())
}
