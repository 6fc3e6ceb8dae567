//! Default values for chain-registry builds.
//!
//! This module provides centralized default values used across commands and
//! the build configuration, ensuring the CLI and the config file agree.

use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Build configuration file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "chain-registry.yaml";

/// Directory holding one sub-directory per chain.
pub const DEFAULT_CHAINS_DIR: &str = "chains";

/// Directory receiving the distributable assets.
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Staging directory for generated source modules.
pub const DEFAULT_TMP_DIR: &str = "tmp";

/// Source tree copied into the staging directory before generation.
pub const DEFAULT_SRC_DIR: &str = "src";

/// Directory holding warp route configs, grouped by token symbol.
pub const DEFAULT_WARP_ROUTES_DIR: &str = "deployments/warp_routes";

/// Package the generated modules import their types from.
pub const DEFAULT_SDK_PACKAGE: &str = "@hyperlane-xyz/sdk";

/// First line of every combined document written back into the chains dir.
pub const AUTO_GEN_PREFIX: &str = "# AUTO-GENERATED; DO NOT EDIT MANUALLY";

/// Header of per-chain metadata files produced by `migrate`.
pub const CHAIN_SCHEMA_REF: &str = "# yaml-language-server: $schema=../schema.json";

/// Returns the default number of chain directories processed at once.
///
/// Uses the available parallelism of the host, falling back to 1 when it
/// cannot be determined.
pub fn default_concurrency() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// Returns the default chains directory as a path.
pub fn default_chains_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CHAINS_DIR)
}
