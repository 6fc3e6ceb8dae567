//! In-memory set of build outputs
//!
//! The emit phase renders every output file into an [`ArtifactSet`] before
//! anything touches the disk. That keeps rendering free of I/O, lets a dry
//! run list what would be written, and makes the write phase a plain flush.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::path::strip_leading_slash;

/// Output directory an artifact is written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputRoot {
    /// Distributable assets (`dist/`).
    Dist,
    /// Staged source modules (`tmp/`).
    Tmp,
    /// Combined documents written back into the chains directory.
    Chains,
}

impl fmt::Display for OutputRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputRoot::Dist => "dist",
            OutputRoot::Tmp => "tmp",
            OutputRoot::Chains => "chains",
        };
        f.write_str(name)
    }
}

/// A rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Root directory the path is relative to
    pub root: OutputRoot,
    /// Path relative to the root
    pub path: PathBuf,
    /// File content
    pub content: Vec<u8>,
}

/// Ordered collection of artifacts keyed by root and relative path
#[derive(Debug, Clone, Default)]
pub struct ArtifactSet {
    files: BTreeMap<(OutputRoot, PathBuf), Vec<u8>>,
}

/// Paths are always relative to their root; a leading separator would
/// make `Path::join` in the write phase escape it.
fn relative_key(path: &Path) -> PathBuf {
    PathBuf::from(strip_leading_slash(&path.to_string_lossy()))
}

impl ArtifactSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn add_bytes<P: AsRef<Path>>(&mut self, root: OutputRoot, path: P, content: Vec<u8>) {
        let path = relative_key(path.as_ref());
        if self.files.contains_key(&(root, path.clone())) {
            log::debug!("Replacing artifact {}/{}", root, path.display());
        }
        self.files.insert((root, path), content);
    }

    /// Add or replace a text file
    pub fn add_string<P: AsRef<Path>>(&mut self, root: OutputRoot, path: P, content: &str) {
        self.add_bytes(root, path, content.as_bytes().to_vec());
    }

    /// Get a file's content
    pub fn get<P: AsRef<Path>>(&self, root: OutputRoot, path: P) -> Option<&[u8]> {
        self.files
            .get(&(root, relative_key(path.as_ref())))
            .map(Vec::as_slice)
    }

    /// Get a file's content as UTF-8 text
    pub fn get_string<P: AsRef<Path>>(&self, root: OutputRoot, path: P) -> Option<&str> {
        self.get(root, path)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Check if a file exists
    pub fn exists<P: AsRef<Path>>(&self, root: OutputRoot, path: P) -> bool {
        self.files.contains_key(&(root, relative_key(path.as_ref())))
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of files under one root
    pub fn count(&self, root: OutputRoot) -> usize {
        self.files.keys().filter(|(r, _)| *r == root).count()
    }

    /// Move every file of `other` into this set (last write wins)
    pub fn extend(&mut self, other: ArtifactSet) {
        for ((root, path), content) in other.files {
            self.add_bytes(root, path, content);
        }
    }

    /// Iterate over files in root-then-path order
    pub fn iter(&self) -> impl Iterator<Item = (OutputRoot, &Path, &[u8])> {
        self.files
            .iter()
            .map(|((root, path), content)| (*root, path.as_path(), content.as_slice()))
    }

    /// Consume the set into a list of artifacts in root-then-path order
    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.files
            .into_iter()
            .map(|((root, path), content)| Artifact {
                root,
                path,
                content,
            })
            .collect()
    }
}
