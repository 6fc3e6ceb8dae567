//! # Migrate Command Implementation
//!
//! This module implements the `migrate` subcommand, which takes a combined
//! metadata document (and optionally a combined addresses document and a
//! directory of logos) and writes one directory per chain in the layout the
//! `build` command reads.
//!
//! ## Example
//!
//! ```bash
//! chain-registry migrate --metadata chainMetadata.yaml \
//!     --addresses addresses.json --logos-dir logos
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use chain_registry::defaults::{default_chains_dir, default_concurrency};
use chain_registry::migrate::{self, MigrateOptions};
use chain_registry::output::{Reporter, Status};

/// Split combined metadata and addresses into per-chain directories
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Combined metadata document (YAML or JSON) keyed by chain name
    #[arg(long, value_name = "PATH")]
    metadata: PathBuf,

    /// Combined addresses document (YAML or JSON) keyed by chain name
    #[arg(long, value_name = "PATH")]
    addresses: Option<PathBuf>,

    /// Directory holding <name>.svg logos
    #[arg(long, value_name = "DIR")]
    logos_dir: Option<PathBuf>,

    /// Directory receiving one sub-directory per chain (default: chains)
    #[arg(long, value_name = "DIR")]
    chains_dir: Option<PathBuf>,

    /// Number of chains written at once
    #[arg(short = 'j', long, value_name = "N", env = "CHAIN_REGISTRY_CONCURRENCY")]
    concurrency: Option<NonZeroUsize>,
}

/// Execute the `migrate` command.
pub fn execute(args: MigrateArgs, color: &str) -> Result<()> {
    let reporter = Reporter::from_flag(color);

    let options = MigrateOptions {
        metadata: args.metadata,
        addresses: args.addresses,
        logos_dir: args.logos_dir,
        chains_dir: args.chains_dir.unwrap_or_else(default_chains_dir),
        concurrency: args.concurrency.unwrap_or_else(default_concurrency),
    };

    let outcome = migrate::execute(&options).with_context(|| {
        format!(
            "Failed to migrate chain data from {}",
            options.metadata.display()
        )
    })?;

    reporter.report(
        Status::Success,
        &format!(
            "Migrated {} chains into {}",
            outcome.migrated.len(),
            options.chains_dir.display()
        ),
    );
    reporter.detail(&format!("{} logos copied", outcome.logos));
    if !outcome.skipped.is_empty() {
        reporter.detail(&format!(
            "Skipped test chains: {}",
            outcome.skipped.join(", ")
        ));
    }
    if !outcome.missing_addresses.is_empty() {
        reporter.report(
            Status::Warning,
            &format!(
                "No addresses for: {}",
                outcome.missing_addresses.join(", ")
            ),
        );
    }

    Ok(())
}
