//! # Error Handling
//!
//! This module defines the centralized error type for the `chain-registry`
//! library. It uses `thiserror` to build a single `Error` enum covering every
//! failure the build pipeline can hit, from a merge running past its depth
//! bound to a chain directory without a `metadata.yaml`.
//!
//! ## Key Components
//!
//! - **`Error`**: every failure mode of the library. Variants carry enough
//!   context (chain name, path, export name) to produce a useful message on
//!   their own.
//! - **`Result<T>`**: alias for `std::result::Result<T, Error>`.
//!
//! The binary wraps these errors in `anyhow` and adds per-command context
//! before they reach the user.

use thiserror::Error;

/// Main error type for chain-registry operations
#[derive(Error, Debug)]
pub enum Error {
    /// A deep merge descended through more nested mappings than allowed.
    ///
    /// Raised instead of silently truncating, so cyclic or pathologically
    /// deep documents fail deterministically.
    #[error("Maximum depth exceeded in merge (max depth {max_depth})")]
    DepthExceeded { max_depth: usize },

    /// The build configuration file could not be parsed or is invalid.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A chain directory could not be loaded.
    #[error("Failed to load chain '{chain}': {message}")]
    ChainLoad { chain: String, message: String },

    /// A warp route config could not be loaded.
    #[error("Failed to load warp route '{route}': {message}")]
    WarpRouteLoad { route: String, message: String },

    /// An error occurred while reading or writing the host filesystem.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// A source module could not be generated.
    #[error("Code generation error for export '{export}': {message}")]
    Codegen { export: String, message: String },

    /// A document could not be converted between formats.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A directory walk error, wrapped from `walkdir::Error`.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
