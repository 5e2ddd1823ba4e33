//! `casedesk config` command - Configuration inspection
//!
//! Shows the effective configuration and where it comes from.

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::Path;

use crate::cli::helpers::{load_config, render_structured};
use crate::cli::GlobalOpts;
use crate::core::config::{Config, CONFIG_KEYS, LOCAL_CONFIG_FILE};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;

    if let Some(key) = &args.key {
        let value = get_config_value(&config, key)
            .ok_or_else(|| miette::miette!("Unknown configuration key '{}'", key))?;
        println!("{}", value);
        return Ok(());
    }

    if let Some(out) = render_structured(&config, global.format)? {
        println!("{}", out);
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in CONFIG_KEYS {
        if let Some(value) = get_config_value(&config, key) {
            println!("  {:<22} {}", style(key).cyan(), value);
        }
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Command line flags (--db, --bind, --upstream)");
    println!("  2. Environment variables (CASEDESK_DB, CASEDESK_BIND, CASEDESK_GATEWAY_BIND, CASEDESK_UPSTREAM, CASEDESK_TIMEOUT_SECS)");
    println!("  3. Local config (./{})", LOCAL_CONFIG_FILE);
    println!("  4. Global config (~/.config/casedesk/config.yaml)");

    Ok(())
}

fn run_path() -> Result<()> {
    match Config::global_config_path() {
        Some(path) => print_path("Global", &path),
        None => println!("  Global: {}", style("(no home directory)").dim()),
    }
    print_path("Local", Path::new(LOCAL_CONFIG_FILE));
    Ok(())
}

fn print_path(label: &str, path: &Path) {
    let marker = if path.exists() {
        style("✓").green()
    } else {
        style("·").dim()
    };
    println!("  {} {:<7} {}", marker, label, path.display());
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available Configuration Keys").bold());
    println!();
    for (key, description) in CONFIG_KEYS {
        println!("  {:<22} {}", style(key).cyan(), description);
    }
    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "database" => Some(config.database.display().to_string()),
        "bind" => Some(config.bind.clone()),
        "gateway_bind" => Some(config.gateway_bind.clone()),
        "upstream" => Some(config.upstream.clone()),
        "request_timeout_secs" => Some(config.request_timeout_secs.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_a_value() {
        let config = Config::default();
        for (key, _) in CONFIG_KEYS {
            assert!(get_config_value(&config, key).is_some(), "{key}");
        }
        assert!(get_config_value(&config, "author").is_none());
    }
}
