//! Split combined chain documents into per-chain directories
//!
//! The inverse of the combine step: given one metadata document keyed by
//! chain name (and optionally a matching addresses document and a directory
//! of `<name>.svg` logos), write a `chains/<name>/` directory per chain in the
//! layout the build expects. Test chains, whose names start with `test`, are
//! skipped.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_yaml::Value;

use crate::concurrent::concurrent_map;
use crate::defaults::CHAIN_SCHEMA_REF;
use crate::error::{Error, Result};
use crate::phases::{ADDRESSES_FILE, LOGO_FILE, METADATA_FILE};
use crate::yaml::parse_mapping;

/// Inputs of a migration
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Combined metadata document (YAML or JSON), keyed by chain name
    pub metadata: PathBuf,
    /// Combined addresses document, keyed by chain name
    pub addresses: Option<PathBuf>,
    /// Directory holding `<name>.svg` logos
    pub logos_dir: Option<PathBuf>,
    /// Directory receiving one sub-directory per chain
    pub chains_dir: PathBuf,
    pub concurrency: NonZeroUsize,
}

/// What a migration did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrateOutcome {
    /// Chains written, in name order
    pub migrated: Vec<String>,
    /// Test chains skipped
    pub skipped: Vec<String>,
    /// Chains written without an addresses file
    pub missing_addresses: Vec<String>,
    /// Logos copied
    pub logos: usize,
}

struct ChainDocs<'a> {
    name: &'a str,
    metadata: &'a Value,
    addresses: Option<&'a Value>,
}

/// Run a migration.
pub fn execute(options: &MigrateOptions) -> Result<MigrateOutcome> {
    info!("Migrating chain data from {}", options.metadata.display());

    let metadata = read_document(&options.metadata, "metadata document")?;
    let addresses = options
        .addresses
        .as_deref()
        .map(|path| read_document(path, "addresses document"))
        .transpose()?;

    let mut outcome = MigrateOutcome::default();
    let mut chains = Vec::new();

    let mut names: Vec<(&str, &Value)> = Vec::new();
    for (key, value) in metadata.as_mapping().into_iter().flatten() {
        let name = key.as_str().ok_or_else(|| Error::Serialization {
            message: format!("chain names must be strings, found {:?}", key),
        })?;
        names.push((name, value));
    }
    names.sort_by(|a, b| a.0.cmp(b.0));

    for (name, value) in names {
        if name.starts_with("test") {
            outcome.skipped.push(name.to_string());
            continue;
        }
        validate_chain_name(name)?;
        let chain_addresses = addresses
            .as_ref()
            .and_then(|a| a.get(name))
            .filter(|v| !v.is_null());
        if chain_addresses.is_none() {
            warn!("No addresses found for chain {}", name);
            outcome.missing_addresses.push(name.to_string());
        }
        chains.push(ChainDocs {
            name,
            metadata: value,
            addresses: chain_addresses,
        });
    }

    let logos = concurrent_map(options.concurrency, &chains, |chain, _| {
        write_chain(chain, &options.chains_dir, options.logos_dir.as_deref())
    })?;

    outcome.logos = logos.into_iter().filter(|copied| *copied).count();
    outcome.migrated = chains.iter().map(|c| c.name.to_string()).collect();
    Ok(outcome)
}

fn read_document(path: &Path, what: &str) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| Error::Filesystem {
        message: format!("Failed to read {} '{}': {}", what, path.display(), e),
    })?;
    // JSON is valid YAML, so one parser covers both
    parse_mapping(&content, what)
}

fn validate_chain_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\']);
    if bad {
        return Err(Error::ChainLoad {
            chain: name.to_string(),
            message: "chain name cannot be used as a directory name".to_string(),
        });
    }
    Ok(())
}

/// Write one chain directory; returns whether a logo was copied.
fn write_chain(chain: &ChainDocs<'_>, chains_dir: &Path, logos_dir: Option<&Path>) -> Result<bool> {
    let dir = chains_dir.join(chain.name);
    fs::create_dir_all(&dir).map_err(|e| Error::Filesystem {
        message: format!("Failed to create directory '{}': {}", dir.display(), e),
    })?;

    let metadata_yaml = format!("{}\n{}", CHAIN_SCHEMA_REF, serde_yaml::to_string(chain.metadata)?);
    fs::write(dir.join(METADATA_FILE), metadata_yaml)?;

    if let Some(addresses) = chain.addresses {
        fs::write(dir.join(ADDRESSES_FILE), serde_yaml::to_string(addresses)?)?;
    }

    let Some(logos_dir) = logos_dir else {
        return Ok(false);
    };
    let logo = logos_dir.join(format!("{}.svg", chain.name));
    if !logo.is_file() {
        return Ok(false);
    }
    fs::copy(&logo, dir.join(LOGO_FILE)).map_err(|e| Error::Filesystem {
        message: format!("Failed to copy '{}': {}", logo.display(), e),
    })?;
    Ok(true)
}
