//! Phase 2: Loading
//!
//! Reads and parses every discovered chain directory and warp route config.
//! Loading runs through [`concurrent_map`] so at most `concurrency` inputs
//! are read at once; the results keep discovery order.
//!
//! A chain directory must contain a `metadata.yaml` mapping with a string
//! `name`. Its `addresses.yaml` and `logo.svg` are optional. Any hard failure
//! aborts the build once the current batch has settled.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use log::{debug, warn};
use serde_yaml::Value;

use super::{
    ChainDir, ChainEntry, Discovered, WarpRoute, WarpRouteSource, ADDRESSES_FILE, LOGO_FILE,
    METADATA_FILE,
};
use crate::concurrent::concurrent_map;
use crate::error::{Error, Result};
use crate::yaml::parse_mapping;

/// Executes Phase 2 of the pipeline.
pub fn execute(
    discovered: &Discovered,
    concurrency: NonZeroUsize,
) -> Result<(Vec<ChainEntry>, Vec<WarpRoute>)> {
    let chains = concurrent_map(concurrency, &discovered.chains, |dir, _| load_chain(dir))?;
    let routes = concurrent_map(concurrency, &discovered.warp_routes, |src, _| {
        load_warp_route(src)
    })?;
    Ok((chains, routes))
}

/// Load one chain directory.
pub fn load_chain(dir: &ChainDir) -> Result<ChainEntry> {
    let fail = |message: String| Error::ChainLoad {
        chain: dir.dir_name.clone(),
        message,
    };

    let metadata_path = dir.path.join(METADATA_FILE);
    let metadata_source = fs::read_to_string(&metadata_path)
        .map_err(|e| fail(format!("cannot read {}: {}", metadata_path.display(), e)))?;
    let metadata =
        parse_mapping(&metadata_source, METADATA_FILE).map_err(|e| fail(e.to_string()))?;

    let name = metadata
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| fail(format!("{} has no string 'name' field", METADATA_FILE)))?
        .to_string();

    if name != dir.dir_name {
        warn!(
            "Chain directory '{}' declares name '{}'",
            dir.dir_name, name
        );
    }

    let addresses_path = dir.path.join(ADDRESSES_FILE);
    let (addresses, addresses_source) = if addresses_path.is_file() {
        let source = fs::read_to_string(&addresses_path)
            .map_err(|e| fail(format!("cannot read {}: {}", addresses_path.display(), e)))?;
        let parsed = parse_mapping(&source, ADDRESSES_FILE).map_err(|e| fail(e.to_string()))?;
        (Some(parsed), Some(source))
    } else {
        debug!("No {} for chain {}", ADDRESSES_FILE, name);
        (None, None)
    };

    let logo_path = dir.path.join(LOGO_FILE);
    let logo = if logo_path.is_file() {
        Some(
            fs::read(&logo_path)
                .map_err(|e| fail(format!("cannot read {}: {}", logo_path.display(), e)))?,
        )
    } else {
        warn!("No {} for chain {}", LOGO_FILE, name);
        None
    };

    debug!("Loaded chain {} from {}", name, dir.path.display());
    Ok(ChainEntry {
        dir_name: dir.dir_name.clone(),
        name,
        metadata,
        metadata_source,
        addresses,
        addresses_source,
        logo,
    })
}

/// Load one warp route config.
pub fn load_warp_route(src: &WarpRouteSource) -> Result<WarpRoute> {
    let fail = |message: String| Error::WarpRouteLoad {
        route: src.id.clone(),
        message,
    };
    let source = fs::read_to_string(&src.path)
        .map_err(|e| fail(format!("cannot read {}: {}", src.path.display(), e)))?;
    let config = parse_mapping(&source, "warp route config").map_err(|e| fail(e.to_string()))?;
    Ok(WarpRoute {
        id: src.id.clone(),
        config,
        source,
    })
}

/// Load an overrides document: a mapping of chain name to partial metadata.
pub fn load_overrides(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| Error::Filesystem {
        message: format!("Failed to read overrides '{}': {}", path.display(), e),
    })?;
    parse_mapping(&content, "overrides document")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn chain_dir(temp: &TempDir, name: &str) -> ChainDir {
        let path = temp.path().join(name);
        fs::create_dir_all(&path).unwrap();
        ChainDir {
            dir_name: name.to_string(),
            path,
        }
    }

    #[test]
    fn test_load_chain_full() {
        let temp = TempDir::new().unwrap();
        let dir = chain_dir(&temp, "ethereum");
        fs::write(dir.path.join(METADATA_FILE), "name: ethereum\nchainId: 1\n").unwrap();
        fs::write(dir.path.join(ADDRESSES_FILE), "mailbox: '0xabc'\n").unwrap();
        fs::write(dir.path.join(LOGO_FILE), "<svg/>").unwrap();

        let entry = load_chain(&dir).unwrap();
        assert_eq!(entry.name, "ethereum");
        assert_eq!(entry.metadata["chainId"].as_u64(), Some(1));
        assert_eq!(entry.metadata_source, "name: ethereum\nchainId: 1\n");
        assert_eq!(
            entry.addresses.unwrap()["mailbox"].as_str(),
            Some("0xabc")
        );
        assert_eq!(entry.logo.as_deref(), Some(&b"<svg/>"[..]));
    }

    #[test]
    fn test_load_chain_optional_files_absent() {
        let temp = TempDir::new().unwrap();
        let dir = chain_dir(&temp, "base");
        fs::write(dir.path.join(METADATA_FILE), "name: base\n").unwrap();

        let entry = load_chain(&dir).unwrap();
        assert!(entry.addresses.is_none());
        assert!(entry.addresses_source.is_none());
        assert!(entry.logo.is_none());
    }

    #[test]
    fn test_load_chain_missing_metadata() {
        let temp = TempDir::new().unwrap();
        let dir = chain_dir(&temp, "empty");
        let err = load_chain(&dir).unwrap_err();
        assert!(matches!(err, Error::ChainLoad { ref chain, .. } if chain == "empty"));
    }

    #[test]
    fn test_load_chain_missing_name() {
        let temp = TempDir::new().unwrap();
        let dir = chain_dir(&temp, "anon");
        fs::write(dir.path.join(METADATA_FILE), "chainId: 5\n").unwrap();
        let err = load_chain(&dir).unwrap_err();
        assert!(err.to_string().contains("no string 'name' field"));
    }

    #[test]
    fn test_load_chain_non_mapping_metadata() {
        let temp = TempDir::new().unwrap();
        let dir = chain_dir(&temp, "list");
        fs::write(dir.path.join(METADATA_FILE), "- a\n- b\n").unwrap();
        let err = load_chain(&dir).unwrap_err();
        assert!(err.to_string().contains("must be a mapping"));
    }

    #[test]
    fn test_load_chain_warns_on_name_mismatch() {
        testing_logger::setup();
        let temp = TempDir::new().unwrap();
        let dir = chain_dir(&temp, "eth");
        fs::write(dir.path.join(METADATA_FILE), "name: ethereum\n").unwrap();
        fs::write(dir.path.join(LOGO_FILE), "<svg/>").unwrap();

        load_chain(&dir).unwrap();

        testing_logger::validate(|captured| {
            assert!(captured.iter().any(|log| log.level == log::Level::Warn
                && log.body.contains("declares name 'ethereum'")));
        });
    }

    #[test]
    fn test_load_warp_route() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a-config.yaml");
        fs::write(&path, "tokens:\n  - chainName: a\n").unwrap();
        let route = load_warp_route(&WarpRouteSource {
            id: "ETH/a".to_string(),
            path,
        })
        .unwrap();
        assert_eq!(route.id, "ETH/a");
        assert!(route.config["tokens"].is_sequence());
    }

    #[test]
    fn test_execute_fails_on_bad_chain() {
        let temp = TempDir::new().unwrap();
        let good = chain_dir(&temp, "good");
        fs::write(good.path.join(METADATA_FILE), "name: good\n").unwrap();
        let bad = chain_dir(&temp, "bad");

        let discovered = Discovered {
            chains: vec![bad, good],
            warp_routes: Vec::new(),
        };
        let err = execute(&discovered, NonZeroUsize::new(2).unwrap()).unwrap_err();
        assert!(matches!(err, Error::ChainLoad { ref chain, .. } if chain == "bad"));
    }

    #[test]
    fn test_load_overrides_requires_mapping() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("overrides.yaml");
        fs::write(&path, "just a string").unwrap();
        assert!(load_overrides(&path).is_err());
    }
}
