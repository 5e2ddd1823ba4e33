use casedesk::cli::{Cli, Commands, GlobalOpts};
use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(&global, cli.command.is_service());

    match cli.command {
        Commands::Init(args) => casedesk::cli::commands::init::run(args, &global),
        Commands::Seed(args) => casedesk::cli::commands::seed::run(args, &global),
        Commands::Verify(args) => casedesk::cli::commands::verify::run(args, &global),
        Commands::Search(args) => casedesk::cli::commands::search::run(args, &global),
        Commands::List(args) => casedesk::cli::commands::list::run(args, &global),
        Commands::Serve(args) => casedesk::cli::commands::serve::run(args, &global),
        Commands::Gateway(args) => casedesk::cli::commands::gateway::run(args, &global),
        Commands::Config(cmd) => casedesk::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => casedesk::cli::commands::completions::run(args),
    }
}

/// Log to stderr; `CASEDESK_LOG` overrides the level picked from the flags
fn init_logging(global: &GlobalOpts, service: bool) {
    let level = if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else if service {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env("CASEDESK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("casedesk={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
