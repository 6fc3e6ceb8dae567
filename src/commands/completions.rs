//! # Completions Command Implementation
//!
//! Prints a completion script for the chosen shell, or writes it to
//! `--output`. The script covers every subcommand and flag of the binary,
//! including the build settings that mirror `chain-registry.yaml` keys.
//!
//! ```bash
//! chain-registry completions bash > ~/.local/share/bash-completion/completions/chain-registry
//! chain-registry completions zsh --output ~/.zfunc/_chain-registry
//! ```

use anyhow::{Context, Result};
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::Cli;

const BIN_NAME: &str = env!("CARGO_BIN_NAME");

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn render(shell: Shell, out: &mut dyn Write) {
    generate(shell, &mut Cli::command(), BIN_NAME, out);
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let Some(path) = args.output else {
        render(args.shell, &mut io::stdout());
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let mut file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    render(args.shell, &mut file);
    log::info!("Wrote {} completions to {}", args.shell, path.display());
    Ok(())
}
