//! Phase 1: Discovery
//!
//! This is the first phase of a registry build. It finds the inputs without
//! reading any of them:
//!
//! 1.  **Chains (`discover_chains`)**: every immediate sub-directory of the
//!     chains directory is a chain. Plain files (such as the combined
//!     `metadata.yaml` written by a previous build) and hidden entries are
//!     skipped. The result is sorted by directory name so builds are
//!     deterministic regardless of `read_dir` order.
//!
//! 2.  **Warp routes (`discover_warp_routes`)**: the warp routes directory is
//!     walked recursively and every file matching `*-config.yaml` or
//!     `*-config.yml` becomes a route. A missing warp routes directory simply
//!     yields no routes.

use std::fs;
use std::path::Path;

use glob::Pattern;
use log::debug;
use walkdir::WalkDir;

use super::{ChainDir, Discovered, WarpRouteSource};
use crate::error::{Error, Result};
use crate::path::warp_route_id;

const WARP_CONFIG_PATTERNS: [&str; 2] = ["*-config.yaml", "*-config.yml"];

/// Executes Phase 1 of the pipeline.
pub fn execute(chains_dir: &Path, warp_routes_dir: &Path) -> Result<Discovered> {
    Ok(Discovered {
        chains: discover_chains(chains_dir)?,
        warp_routes: discover_warp_routes(warp_routes_dir)?,
    })
}

/// List chain directories, sorted by name.
pub fn discover_chains(chains_dir: &Path) -> Result<Vec<ChainDir>> {
    let entries = fs::read_dir(chains_dir).map_err(|e| Error::Filesystem {
        message: format!(
            "Failed to read chains directory '{}': {}",
            chains_dir.display(),
            e
        ),
    })?;

    let mut chains = Vec::new();
    for entry in entries {
        let entry = entry?;
        let dir_name = entry.file_name().to_string_lossy().into_owned();
        if dir_name.starts_with('.') {
            continue;
        }
        if !entry.file_type()?.is_dir() {
            debug!("Skipping non-directory {}", entry.path().display());
            continue;
        }
        chains.push(ChainDir {
            dir_name,
            path: entry.path(),
        });
    }

    chains.sort_by(|a, b| a.dir_name.cmp(&b.dir_name));
    debug!(
        "Discovered {} chain directories in {}",
        chains.len(),
        chains_dir.display()
    );
    Ok(chains)
}

/// Find warp route configs below `root`, sorted by path.
pub fn discover_warp_routes(root: &Path) -> Result<Vec<WarpRouteSource>> {
    if !root.is_dir() {
        debug!(
            "No warp routes directory at {}, skipping",
            root.display()
        );
        return Ok(Vec::new());
    }

    let patterns = WARP_CONFIG_PATTERNS
        .iter()
        .map(|p| Pattern::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut routes = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if !patterns.iter().any(|p| p.matches(&file_name)) {
            continue;
        }
        routes.push(WarpRouteSource {
            id: warp_route_id(root, entry.path())?,
            path: entry.path().to_path_buf(),
        });
    }

    debug!(
        "Discovered {} warp route configs in {}",
        routes.len(),
        root.display()
    );
    Ok(routes)
}
