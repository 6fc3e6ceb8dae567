//! # Build Command Implementation
//!
//! This module implements the `build` subcommand, which runs the full asset
//! pipeline: discover the chain directories, load and combine them, render
//! every output and write it to disk.
//!
//! ## Configuration
//!
//! Settings come from `chain-registry.yaml` in the working directory (or the
//! file named by `--config`). Flags given on the command line take precedence
//! over the file, and anything left unset falls back to the built-in
//! defaults.
//!
//! With `--dry-run` nothing is staged or written; the command lists the files
//! the build would produce instead.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use chain_registry::config::{self, BuildConfig};
use chain_registry::defaults::DEFAULT_CONFIG_FILE;
use chain_registry::output::{Reporter, Status};
use chain_registry::phases::orchestrator::{self, BuildOutcome};

/// Build the registry assets from the chains directory
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Path to the build configuration file (default: chain-registry.yaml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory with one sub-directory per chain
    #[arg(long, value_name = "DIR")]
    chains_dir: Option<PathBuf>,

    /// Output directory for distributable assets
    #[arg(long, value_name = "DIR")]
    dist_dir: Option<PathBuf>,

    /// Staging directory for generated source modules
    #[arg(long, value_name = "DIR")]
    tmp_dir: Option<PathBuf>,

    /// Source tree copied into the staging directory
    #[arg(long, value_name = "DIR")]
    src_dir: Option<PathBuf>,

    /// Directory holding warp route configs
    #[arg(long, value_name = "DIR")]
    warp_routes_dir: Option<PathBuf>,

    /// Number of chains processed at once
    #[arg(short = 'j', long, value_name = "N", env = "CHAIN_REGISTRY_CONCURRENCY")]
    concurrency: Option<usize>,

    /// Maximum nesting depth for metadata merges
    #[arg(long, value_name = "N")]
    max_merge_depth: Option<usize>,

    /// Document of per-chain metadata overrides
    #[arg(long, value_name = "PATH")]
    overrides: Option<PathBuf>,

    /// Package generated modules import their types from
    #[arg(long, value_name = "NAME")]
    sdk_package: Option<String>,

    /// Show what would be written without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,
}

impl BuildArgs {
    /// Load the configuration file and layer the command-line flags on top.
    fn resolve_config(&self) -> Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Configuration file not found: {}", path.display());
                }
                config::from_file(path).with_context(|| {
                    format!("Failed to load configuration from {}", path.display())
                })?
            }
            None => config::load_or_default(DEFAULT_CONFIG_FILE).with_context(|| {
                format!("Failed to load configuration from {}", DEFAULT_CONFIG_FILE)
            })?,
        };

        if let Some(dir) = &self.chains_dir {
            config.chains_dir = dir.clone();
        }
        if let Some(dir) = &self.dist_dir {
            config.dist_dir = dir.clone();
        }
        if let Some(dir) = &self.tmp_dir {
            config.tmp_dir = dir.clone();
        }
        if let Some(dir) = &self.src_dir {
            config.src_dir = dir.clone();
        }
        if let Some(dir) = &self.warp_routes_dir {
            config.warp_routes_dir = dir.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(depth) = self.max_merge_depth {
            config.max_merge_depth = depth;
        }
        if let Some(path) = &self.overrides {
            config.overrides = Some(path.clone());
        }
        if let Some(package) = &self.sdk_package {
            config.sdk_package = package.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Execute the `build` command.
pub fn execute(args: BuildArgs, color: &str) -> Result<()> {
    let start_time = Instant::now();
    let reporter = Reporter::from_flag(color);

    let config = args.resolve_config()?;

    if args.dry_run {
        reporter.report(Status::Info, "Dry run: no files will be written");
    }

    let outcome = match orchestrator::execute_build(&config, args.dry_run) {
        Ok(outcome) => outcome,
        Err(e) => {
            reporter.report(Status::Error, "Build failed");
            return Err(e).context("Registry build failed");
        }
    };

    let duration = start_time.elapsed();
    if args.dry_run {
        report_dry_run(&reporter, &outcome);
    } else {
        reporter.report(
            Status::Success,
            &format!("Built registry in {:.2}s", duration.as_secs_f64()),
        );
        reporter.detail(&format!(
            "{} chains, {} warp routes",
            outcome.chains, outcome.warp_routes
        ));
        reporter.detail(&format!(
            "{} files written, {} source files staged",
            outcome.written, outcome.staged
        ));
    }

    Ok(())
}

fn report_dry_run(reporter: &Reporter, outcome: &BuildOutcome) {
    reporter.report(
        Status::Success,
        &format!(
            "{} chains and {} warp routes would produce {} files",
            outcome.chains,
            outcome.warp_routes,
            outcome.artifacts.len()
        ),
    );
    for (root, path, _) in outcome.artifacts.iter() {
        reporter.detail(&format!("{}/{}", root, path.display()));
    }
}
