//! Path utilities for chain-registry

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Suffixes marking a warp route config file.
const WARP_CONFIG_SUFFIXES: [&str; 2] = ["-config.yaml", "-config.yml"];

/// Remove a single leading slash or backslash
pub fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/')
        .or_else(|| path.strip_prefix('\\'))
        .unwrap_or(path)
}

/// Make `path` absolute against the working directory and resolve `.` and
/// `..` lexically, without touching the filesystem.
pub fn normalize_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// True when one path equals or contains the other.
pub fn paths_overlap(a: &Path, b: &Path) -> Result<bool> {
    let (a, b) = (normalize_path(a)?, normalize_path(b)?);
    Ok(a.starts_with(&b) || b.starts_with(&a))
}

/// Derive the id of a warp route from its config file location.
///
/// The id is the config's directory relative to `root`, followed by the file
/// name without its `-config.yaml` suffix, always joined with `/`:
/// `<root>/ETH/arbitrum-base-config.yaml` becomes `ETH/arbitrum-base`.
pub fn warp_route_id(root: &Path, config_path: &Path) -> Result<String> {
    let relative = config_path
        .strip_prefix(root)
        .map_err(|_| Error::Filesystem {
            message: format!(
                "Warp route config '{}' is outside '{}'",
                config_path.display(),
                root.display()
            ),
        })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
            _ => {
                return Err(Error::Filesystem {
                    message: format!("Unexpected path component in '{}'", relative.display()),
                })
            }
        }
    }

    let file_name = segments.pop().unwrap_or_default();
    let stem = WARP_CONFIG_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .ok_or_else(|| Error::Filesystem {
            message: format!("'{}' is not a warp route config file", file_name),
        })?;

    segments.push(stem.to_string());
    Ok(segments.join("/"))
}
