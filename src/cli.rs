//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Chain Registry - Build per-chain metadata, address and warp route assets
#[derive(Parser, Debug)]
#[command(name = "chain-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the registry assets from the chains directory
    Build(commands::build::BuildArgs),

    /// Split combined metadata and addresses into per-chain directories
    Migrate(commands::migrate::MigrateArgs),

    /// Deep-merge two YAML or JSON documents and print the result
    Merge(commands::merge::MergeArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Build(args) => commands::build::execute(args, &self.color),
            Commands::Migrate(args) => commands::migrate::execute(args, &self.color),
            Commands::Merge(args) => commands::merge::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Set up `env_logger`; `RUST_LOG` wins over `--log-level` when set.
fn init_logging(log_level: &str) {
    let env = env_logger::Env::default().default_filter_or(log_level.to_lowercase());
    // A logger may already be installed when running under a test harness
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_default() {
        let cli = Cli::parse_from(["chain-registry", "merge", "a.yaml", "b.yaml"]);
        assert_eq!(cli.color, "auto");
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "chain-registry",
            "build",
            "--log-level",
            "debug",
            "--color",
            "never",
        ]);
        assert_eq!(cli.color, "never");
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::Build(_)));
    }
}
