//! `casedesk seed` command - Provision, insert missing sample cases, verify
//!
//! A storage error while seeding is reported and logged, the batch is rolled
//! back, and the command carries on to the verification step. With
//! `--format json|yaml` the seed report and the verification report are
//! printed together as one document.

use chrono::Local;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::commands::init::print_provision_report;
use crate::cli::commands::verify::print_verification;
use crate::cli::helpers::{open_store, render_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{seed, verify, CaseStore, SeedReport, StoreError, VerificationReport};

#[derive(clap::Args, Debug)]
pub struct SeedArgs {
    /// Skip the verification report
    #[arg(long)]
    pub no_verify: bool,
}

/// Structured output of a seed run
#[derive(Debug, Serialize)]
struct SeedRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<SeedReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verification: Option<VerificationReport>,
}

pub fn run(args: SeedArgs, global: &GlobalOpts) -> Result<()> {
    let (_config, store) = open_store(global)?;
    if matches!(global.format, OutputFormat::Json | OutputFormat::Yaml) {
        return run_structured(&store, &args, global.format);
    }

    let provision = store.provision().into_diagnostic()?;
    if !global.quiet {
        print_provision_report(&store, &provision);
    }

    match seed(&store) {
        Ok(report) => print_seed_report(&report),
        Err(err) => report_seed_failure(&err),
    }

    if args.no_verify {
        return Ok(());
    }

    println!();
    match verify(&store) {
        Ok(report) => print_verification(&report, global.format)?,
        Err(err) => {
            tracing::error!("verification failed: {}", err);
            eprintln!("{} Verification failed: {}", style("✗").red(), err);
        }
    }

    Ok(())
}

fn run_structured(store: &CaseStore, args: &SeedArgs, format: OutputFormat) -> Result<()> {
    store.provision().into_diagnostic()?;

    let mut run = SeedRun {
        seed: None,
        error: None,
        verification: None,
    };
    match seed(store) {
        Ok(report) => run.seed = Some(report),
        Err(err) => {
            report_seed_failure(&err);
            run.error = Some(err.to_string());
        }
    }

    if !args.no_verify {
        match verify(store) {
            Ok(report) => run.verification = Some(report),
            Err(err) => tracing::error!("verification failed: {}", err),
        }
    }

    let out = render_structured(&run, format)?.unwrap_or_default();
    println!("{}", out);
    Ok(())
}

fn report_seed_failure(err: &StoreError) {
    tracing::error!("seeding failed, batch rolled back: {}", err);
    eprintln!("{} Database error: {}", style("✗").red(), err);
}

fn print_seed_report(report: &SeedReport) {
    if report.nothing_new() {
        println!(
            "{} All sample cases already exist in database ({} cases)",
            style("ℹ").blue(),
            report.total
        );
        return;
    }

    println!(
        "{} Added {} new cases at {}",
        style("✓").green(),
        style(report.inserted).green(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Database now contains {} total cases",
        style(report.total).cyan()
    );
}
