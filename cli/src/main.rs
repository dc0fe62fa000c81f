//! CLI entrypoint for interaction-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod simulate;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use relay_infrastructure::{ConfigLoader, FileConfig, Severity};
use relay_presentation::{Cli, Command, ConsoleFormatter};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config_sources {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting interaction-relay");

    let config = load_config(&cli)?;

    match &cli.command {
        Some(Command::Simulate(args)) => {
            let report = simulate::run(args, &config).await?;
            let output = if args.json {
                ConsoleFormatter::format_json(&report)
            } else {
                ConsoleFormatter::format(&report)
            };
            println!("{}", output);

            if !report.is_consistent() {
                anyhow::bail!("an interaction received more than one first reply");
            }
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    for issue in config.validate() {
        match issue.severity {
            Severity::Error => error!("Config {}: {}", issue.field, issue.message),
            Severity::Warning => warn!("Config {}: {}", issue.field, issue.message),
        }
    }

    Ok(config)
}
