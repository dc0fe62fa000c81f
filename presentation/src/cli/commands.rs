//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use relay_domain::InteractionKind;
use std::path::PathBuf;

/// Which interaction variants the simulation generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Slash command invocations
    Command,
    /// Button presses
    Component,
    /// Autocomplete requests
    Autocomplete,
    /// Modal submissions
    ModalSubmit,
    /// Cycle through all four variants
    Mixed,
}

impl VariantArg {
    /// Variant of the `index`-th generated interaction.
    pub fn kind_for(&self, index: usize) -> InteractionKind {
        match self {
            VariantArg::Command => InteractionKind::Command,
            VariantArg::Component => InteractionKind::Component,
            VariantArg::Autocomplete => InteractionKind::Autocomplete,
            VariantArg::ModalSubmit => InteractionKind::ModalSubmit,
            VariantArg::Mixed => InteractionKind::ALL[index % InteractionKind::ALL.len()],
        }
    }
}

/// CLI arguments for interaction-relay
#[derive(Parser, Debug)]
#[command(name = "interaction-relay")]
#[command(author, version, about = "Interaction reply guard and typed event dispatcher")]
#[command(long_about = r#"
interaction-relay turns inbound interactions into typed notifications for
independent subscribers and enforces that each interaction receives exactly
one first reply, no matter how many subscribers race to send it.

Configuration files are loaded from (in priority order):
1. RELAY_<SECTION>__<KEY>   Environment variables
2. --config <path>          Explicit config file
3. ./relay.toml             Project-level config
4. ~/.config/interaction-relay/config.toml   Global config

Example:
  interaction-relay simulate --count 20 --racers 3
  interaction-relay simulate --variant autocomplete --unknown 2 --json
  interaction-relay --show-config-sources
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config_sources: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dispatch synthetic webhook interactions to racing subscribers and
    /// report which reply won each race
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Interaction variant to generate
    #[arg(long, value_enum, default_value = "mixed")]
    pub variant: VariantArg,

    /// Number of interactions to dispatch
    #[arg(short = 'n', long, default_value_t = 8)]
    pub count: usize,

    /// Subscribers racing to reply to each interaction
    #[arg(short, long, default_value_t = 2)]
    pub racers: usize,

    /// Additional interactions with an unknown variant
    #[arg(long, default_value_t = 0)]
    pub unknown: usize,

    /// Override the configured number of ingress workers
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Await listeners one after another instead of spawning them
    #[arg(long)]
    pub sync_listeners: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simulate_with_options() {
        let cli = Cli::try_parse_from([
            "interaction-relay",
            "-vv",
            "simulate",
            "--variant",
            "modal-submit",
            "--count",
            "3",
            "--racers",
            "4",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Some(Command::Simulate(args)) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.variant, VariantArg::ModalSubmit);
        assert_eq!(args.count, 3);
        assert_eq!(args.racers, 4);
        assert!(args.json);
        assert_eq!(args.unknown, 0);
    }

    #[test]
    fn show_config_sources_needs_no_subcommand() {
        let cli = Cli::try_parse_from(["interaction-relay", "--show-config-sources"]).unwrap();
        assert!(cli.show_config_sources);
        assert!(cli.command.is_none());
    }

    #[test]
    fn mixed_cycles_through_variants() {
        let kinds: Vec<_> = (0..5).map(|i| VariantArg::Mixed.kind_for(i)).collect();
        assert_eq!(
            kinds,
            vec![
                InteractionKind::Command,
                InteractionKind::Component,
                InteractionKind::Autocomplete,
                InteractionKind::ModalSubmit,
                InteractionKind::Command,
            ]
        );
        assert_eq!(VariantArg::Component.kind_for(3), InteractionKind::Component);
    }
}
