//! `casedesk gateway` command - Relay searches to an upstream search service

use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::load_config;
use crate::cli::GlobalOpts;
use crate::web::{self, gateway::GatewayState};

#[derive(clap::Args, Debug)]
pub struct GatewayArgs {
    /// Listen address (overrides config, e.g. 127.0.0.1:3000)
    #[arg(long)]
    pub bind: Option<String>,

    /// Base URL of the upstream search service
    #[arg(long)]
    pub upstream: Option<String>,
}

pub fn run(args: GatewayArgs, global: &GlobalOpts) -> Result<()> {
    let mut config = load_config(global)?;
    if let Some(bind) = args.bind {
        config.gateway_bind = bind;
    }
    if let Some(upstream) = args.upstream {
        config.upstream = upstream;
    }
    let addr = config.gateway_addr().into_diagnostic()?;

    tracing::info!(upstream = %config.upstream, "relaying case searches");
    let state = GatewayState::new(&config.upstream, config.request_timeout());
    let router = web::gateway::routes(state);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()?
        .block_on(web::serve(addr, router, "casedesk gateway"))
        .into_diagnostic()
}
