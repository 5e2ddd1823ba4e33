//! `casedesk serve` command - Run the search web service

use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_store;
use crate::cli::GlobalOpts;
use crate::core::seed;
use crate::web::{self, AppState};

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Listen address (overrides config, e.g. 127.0.0.1:8080)
    #[arg(long)]
    pub bind: Option<String>,

    /// Insert any missing sample cases before serving
    #[arg(long)]
    pub seed: bool,
}

pub fn run(args: ServeArgs, global: &GlobalOpts) -> Result<()> {
    let (mut config, store) = open_store(global)?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    let addr = config.bind_addr().into_diagnostic()?;

    // Startup provisioning; safe on every start
    let report = store.provision().into_diagnostic()?;
    if report.upgraded {
        tracing::warn!(dropped = report.dropped_rows, "cases table was upgraded on startup");
    }

    if args.seed {
        match seed(&store) {
            Ok(report) => tracing::info!(inserted = report.inserted, total = report.total, "sample cases ready"),
            Err(err) => tracing::error!("seeding failed, batch rolled back: {}", err),
        }
    }

    let state = AppState::new(store, config.request_timeout()).into_diagnostic()?;
    let router = web::routes(state);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()?
        .block_on(web::serve(addr, router, "casedesk"))
        .into_diagnostic()
}
