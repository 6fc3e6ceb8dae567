//! Phase 5: Staging
//!
//! Recreates the staging directory that receives the generated source
//! modules. Anything left from a previous build is removed first, then the
//! source tree (when it exists) is copied in so the generated modules land
//! next to the hand-written ones.

use std::fs;
use std::path::Path;

use log::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Executes Phase 5 of the pipeline.
///
/// Returns the number of files copied from `src_dir`.
pub fn execute(src_dir: &Path, tmp_dir: &Path) -> Result<usize> {
    info!("Preparing staging directory {}", tmp_dir.display());

    if tmp_dir.exists() {
        fs::remove_dir_all(tmp_dir).map_err(|e| Error::Filesystem {
            message: format!("Failed to clear '{}': {}", tmp_dir.display(), e),
        })?;
    }
    fs::create_dir_all(tmp_dir).map_err(|e| Error::Filesystem {
        message: format!("Failed to create directory '{}': {}", tmp_dir.display(), e),
    })?;

    if !src_dir.is_dir() {
        debug!("No source tree at {}, staging empty", src_dir.display());
        return Ok(0);
    }

    copy_tree(src_dir, tmp_dir)
}

/// Recursively copy the files of `from` into `to`.
pub fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(from) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|_| Error::Filesystem {
                message: format!("'{}' escaped '{}'", entry.path().display(), from.display()),
            })?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).map_err(|e| Error::Filesystem {
                message: format!(
                    "Failed to copy '{}' to '{}': {}",
                    entry.path().display(),
                    target.display(),
                    e
                ),
            })?;
            copied += 1;
        }
    }
    debug!(
        "Copied {} files from {} to {}",
        copied,
        from.display(),
        to.display()
    );
    Ok(copied)
}
