//! Implementation of the phases of a registry build.
//!
//! ## Overview
//!
//! A build follows 6 phases:
//! 1. Discovery - List chain directories and warp route configs
//! 2. Loading - Parse every chain directory and warp route config, in parallel batches
//! 3. Combining - Fold the loaded entries into the combined registry, applying overrides
//! 4. Emitting - Render every output file into an in-memory artifact set
//! 5. Staging - Recreate the staging directory from the source tree
//! 6. Writing - Flush the artifact set to disk, in parallel batches
//!
//! Phases 5 and 6 are skipped on a dry run. Each phase only depends on the
//! output of the phases before it; the combined registry is returned by
//! phase 3 rather than accumulated in shared state.

use std::path::PathBuf;

use serde_yaml::{Mapping, Value};

// Phase modules
pub mod combine;
pub mod discovery;
pub mod emit;
pub mod load;
pub mod orchestrator;
pub mod stage;
pub mod write;

pub use discovery as phase1;
pub use load as phase2;
pub use combine as phase3;
pub use emit as phase4;
pub use stage as phase5;
pub use write as phase6;

/// Required per-chain metadata document.
pub const METADATA_FILE: &str = "metadata.yaml";
/// Optional per-chain contract addresses document.
pub const ADDRESSES_FILE: &str = "addresses.yaml";
/// Optional per-chain logo.
pub const LOGO_FILE: &str = "logo.svg";

/// A chain directory found during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDir {
    /// Directory name, used for per-chain output paths
    pub dir_name: String,
    /// Full path to the directory
    pub path: PathBuf,
}

/// A warp route config file found during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarpRouteSource {
    /// Route id derived from the file location
    pub id: String,
    /// Full path to the config file
    pub path: PathBuf,
}

/// Everything discovery found on disk
#[derive(Debug, Clone, Default)]
pub struct Discovered {
    pub chains: Vec<ChainDir>,
    pub warp_routes: Vec<WarpRouteSource>,
}

/// A parsed chain directory
#[derive(Debug, Clone)]
pub struct ChainEntry {
    /// Directory the chain was loaded from
    pub dir_name: String,
    /// The `name` field of the metadata, key in the combined registry
    pub name: String,
    /// Parsed metadata mapping
    pub metadata: Value,
    /// Original metadata text, copied verbatim to the dist directory
    pub metadata_source: String,
    /// Parsed addresses mapping, if the chain has one
    pub addresses: Option<Value>,
    /// Original addresses text
    pub addresses_source: Option<String>,
    /// Logo bytes, if the chain has one
    pub logo: Option<Vec<u8>>,
}

/// A parsed warp route config
#[derive(Debug, Clone)]
pub struct WarpRoute {
    pub id: String,
    pub config: Value,
    /// Original config text
    pub source: String,
}

/// The combined registry produced by phase 3
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Loaded chains in discovery order
    pub chains: Vec<ChainEntry>,
    /// Loaded warp routes in discovery order
    pub warp_routes: Vec<WarpRoute>,
    /// Chain name to (merged, overridden) metadata
    pub metadata: Mapping,
    /// Chain name to merged addresses, for chains that have any
    pub addresses: Mapping,
    /// Warp route id to config
    pub warp_route_configs: Mapping,
}

impl Registry {
    /// Number of distinct chain names in the combined registry
    pub fn chain_count(&self) -> usize {
        self.metadata.len()
    }
}
