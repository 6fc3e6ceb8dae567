//! # Merge Command Implementation
//!
//! This module implements the `merge` subcommand, which deep-merges an
//! overlay document onto a base document and prints the result as YAML.
//! Values from the overlay win; nested mappings are merged key by key up to
//! `--max-depth` levels.

use anyhow::{Context, Result};
use clap::Args;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

use chain_registry::merge::{obj_merge, DEFAULT_MAX_DEPTH};
use chain_registry::yaml::to_yaml_string;

/// Deep-merge two YAML or JSON documents and print the result
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Base document
    #[arg(value_name = "BASE")]
    base: PathBuf,

    /// Document merged on top of the base
    #[arg(value_name = "OVERLAY")]
    overlay: PathBuf,

    /// Maximum number of nested mapping levels to merge
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Sort mapping keys in the output
    #[arg(long)]
    sort_keys: bool,
}

fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Execute the `merge` command.
pub fn execute(args: MergeArgs) -> Result<()> {
    let base = read_document(&args.base)?;
    let overlay = read_document(&args.overlay)?;

    let merged = obj_merge(&base, &overlay, args.max_depth).with_context(|| {
        format!(
            "Failed to merge {} onto {}",
            args.overlay.display(),
            args.base.display()
        )
    })?;

    let text = if args.sort_keys {
        to_yaml_string(&merged, None)?
    } else {
        serde_yaml::to_string(&merged)?
    };
    print!("{}", text);
    Ok(())
}
