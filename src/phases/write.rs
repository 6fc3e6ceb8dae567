//! Phase 6: Writing to Disk
//!
//! This is the final phase of a registry build. It flushes the rendered
//! [`ArtifactSet`] to the host filesystem.
//!
//! ## Process
//!
//! 1.  **Resolve**: each artifact's root (`dist`, `tmp` or `chains`) is mapped
//!     to a directory through [`OutputDirs`].
//!
//! 2.  **Create Directories**: missing parent directories are created
//!     recursively.
//!
//! 3.  **Write Content**: the bytes are written, at most `concurrency` files
//!     at a time. The first failure stops the build once its batch is done.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use log::info;

use crate::artifacts::{Artifact, ArtifactSet, OutputRoot};
use crate::concurrent::concurrent_map;
use crate::error::{Error, Result};

/// Directories the artifact roots resolve to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub dist: PathBuf,
    pub tmp: PathBuf,
    pub chains: PathBuf,
}

impl OutputDirs {
    /// Directory for a root
    pub fn resolve(&self, root: OutputRoot) -> &Path {
        match root {
            OutputRoot::Dist => &self.dist,
            OutputRoot::Tmp => &self.tmp,
            OutputRoot::Chains => &self.chains,
        }
    }

    /// Full path of an artifact
    pub fn path_of(&self, artifact: &Artifact) -> PathBuf {
        self.resolve(artifact.root).join(&artifact.path)
    }
}

/// Execute Phase 6: write all artifacts to disk.
///
/// Returns the number of files written.
pub fn execute(artifacts: ArtifactSet, dirs: &OutputDirs, concurrency: NonZeroUsize) -> Result<usize> {
    let artifacts = artifacts.into_artifacts();
    concurrent_map(concurrency, &artifacts, |artifact, _| {
        write_artifact(artifact, dirs)
    })?;
    Ok(artifacts.len())
}

fn write_artifact(artifact: &Artifact, dirs: &OutputDirs) -> Result<()> {
    let full_path = dirs.path_of(artifact);

    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
            message: format!("Failed to create directory '{}': {}", parent.display(), e),
        })?;
    }

    fs::write(&full_path, &artifact.content).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", full_path.display(), e),
    })?;

    info!("Written file: {}", full_path.display());
    Ok(())
}
