//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, gateway::GatewayArgs, init::InitArgs,
    list::ListArgs, search::SearchArgs, seed::SeedArgs, serve::ServeArgs, verify::VerifyArgs,
};

#[derive(Parser)]
#[command(name = "casedesk")]
#[command(author, version, about = "Court case status lookup")]
#[command(long_about = "Look up court case records by case type, number and filing year. \
    Provisions and seeds the SQLite case database and serves the search page and JSON API.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Case database path (overrides config and CASEDESK_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or upgrade the case database schema
    Init(InitArgs),

    /// Insert the sample cases that are not yet present, then verify
    Seed(SeedArgs),

    /// Show the record count and case type breakdown
    Verify(VerifyArgs),

    /// Look up one case by type, number and filing year
    Search(SearchArgs),

    /// List stored cases
    List(ListArgs),

    /// Run the search web service
    Serve(ServeArgs),

    /// Run the gateway that relays searches to an upstream search service
    Gateway(GatewayArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Commands {
    /// Long-running services log at info level by default
    pub fn is_service(&self) -> bool {
        matches!(self, Commands::Serve(_) | Commands::Gateway(_))
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables and text
    #[default]
    Auto,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// Markdown tables
    Md,
}
