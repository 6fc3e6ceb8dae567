//! # Chain Registry CLI
//!
//! This is the binary entry point for the `chain-registry` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Turning library errors into a non-zero exit status with a readable
//!   message.
//!
//! The build pipeline itself lives in the `chain_registry` library crate; the
//! binary only wires flags, configuration and reporting around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
