//! `casedesk init` command - Create or upgrade the case database schema

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_store, render_structured};
use crate::cli::GlobalOpts;
use crate::core::{CaseStore, ProvisionReport};

#[derive(clap::Args, Debug)]
pub struct InitArgs {}

pub fn run(_args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let (_config, store) = open_store(global)?;
    let report = store.provision().into_diagnostic()?;

    if let Some(out) = render_structured(&report, global.format)? {
        println!("{}", out);
        return Ok(());
    }

    if !global.quiet {
        print_provision_report(&store, &report);
    }
    Ok(())
}

/// Print the outcome of provisioning in human-readable form
pub fn print_provision_report(store: &CaseStore, report: &ProvisionReport) {
    let location = style(store.path().display()).cyan();

    if report.created {
        println!("{} Created cases table in {}", style("✓").green(), location);
    } else if report.upgraded {
        println!(
            "{} Upgraded cases table in {} to the constrained schema",
            style("✓").green(),
            location
        );
        println!("  Rows kept:    {}", style(report.migrated_rows).green());
        if report.dropped_rows > 0 {
            println!(
                "  Rows dropped: {} (failed the current constraints)",
                style(report.dropped_rows).red()
            );
        }
    } else {
        println!("{} Schema is up to date in {}", style("✓").green(), location);
    }
}
