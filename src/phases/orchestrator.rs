//! Orchestrator for the complete build
//!
//! This module coordinates all phases to provide a single entry point for
//! a registry build.

use super::{phase1, phase2, phase3, phase4, phase5, phase6};
use crate::artifacts::ArtifactSet;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::phases::write::OutputDirs;
use log::info;

/// Summary of a finished build
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Chain directories loaded
    pub chain_dirs: usize,
    /// Distinct chain names in the combined registry
    pub chains: usize,
    /// Warp routes loaded
    pub warp_routes: usize,
    /// Everything the build rendered
    pub artifacts: ArtifactSet,
    /// Files copied into the staging directory
    pub staged: usize,
    /// Files written to disk (zero on a dry run)
    pub written: usize,
}

/// Execute the complete build (Phases 1-6)
///
/// 1. Discover chain directories and warp route configs
/// 2. Load them in parallel batches
/// 3. Combine them into the registry, applying overrides
/// 4. Render every output into memory
/// 5. Recreate the staging directory (skipped when `dry_run`)
/// 6. Write the rendered outputs to disk (skipped when `dry_run`)
pub fn execute_build(config: &BuildConfig, dry_run: bool) -> Result<BuildOutcome> {
    config.validate()?;
    let concurrency = config.concurrency()?;

    // Phase 1: Discovery
    info!("Discovering chains in {}", config.chains_dir.display());
    let discovered = phase1::execute(&config.chains_dir, &config.warp_routes_dir)?;

    // Phase 2: Loading
    info!(
        "Loading {} chains and {} warp routes",
        discovered.chains.len(),
        discovered.warp_routes.len()
    );
    let (chains, warp_routes) = phase2::execute(&discovered, concurrency)?;
    let overrides = config
        .overrides
        .as_deref()
        .map(phase2::load_overrides)
        .transpose()?;

    // Phase 3: Combining
    info!("Updating combined chain metadata and addresses");
    let registry = phase3::execute(
        chains,
        warp_routes,
        overrides.as_ref(),
        config.max_merge_depth,
    )?;

    // Phase 4: Emitting
    let artifacts = phase4::execute(&registry, &config.sdk_package, concurrency)?;

    let mut outcome = BuildOutcome {
        chain_dirs: registry.chains.len(),
        chains: registry.chain_count(),
        warp_routes: registry.warp_routes.len(),
        artifacts,
        staged: 0,
        written: 0,
    };

    if dry_run {
        info!(
            "Dry run: {} files would be written",
            outcome.artifacts.len()
        );
        return Ok(outcome);
    }

    // Phase 5: Staging
    outcome.staged = phase5::execute(&config.src_dir, &config.tmp_dir)?;

    // Phase 6: Writing
    let dirs = OutputDirs {
        dist: config.dist_dir.clone(),
        tmp: config.tmp_dir.clone(),
        chains: config.chains_dir.clone(),
    };
    outcome.written = phase6::execute(outcome.artifacts.clone(), &dirs, concurrency)?;

    info!("Build process completed successfully");
    Ok(outcome)
}
