//! Phase 3: Combining
//!
//! Folds the loaded chains and warp routes into a [`Registry`]. The
//! registry is built in a local accumulator and returned; nothing here is
//! shared or global.
//!
//! ## Process
//!
//! 1.  **Chains**: metadata is keyed by each chain's `name`. When two
//!     directories declare the same name, the later one (in discovery order)
//!     is merged over the earlier one with [`obj_merge`] and a warning is
//!     logged. Addresses are combined the same way.
//!
//! 2.  **Overrides**: an optional document mapping chain names to partial
//!     metadata is merged over the combined metadata. Overrides naming a
//!     chain that was not loaded are ignored with a warning.
//!
//! 3.  **Warp routes**: configs are keyed by route id.

use log::{debug, warn};
use serde_yaml::{Mapping, Value};

use super::{ChainEntry, Registry, WarpRoute};
use crate::error::Result;
use crate::merge::{obj_merge, obj_merge_opt};

/// Executes Phase 3 of the pipeline.
pub fn execute(
    chains: Vec<ChainEntry>,
    warp_routes: Vec<WarpRoute>,
    overrides: Option<&Value>,
    max_depth: usize,
) -> Result<Registry> {
    let mut metadata = Mapping::new();
    let mut addresses = Mapping::new();

    for entry in &chains {
        let key = Value::String(entry.name.clone());

        if metadata.contains_key(&key) {
            warn!(
                "Chain '{}' is declared more than once, merging '{}' over the earlier entry",
                entry.name, entry.dir_name
            );
        }
        insert_merged(&mut metadata, key.clone(), Some(&entry.metadata), max_depth)?;
        insert_merged(&mut addresses, key, entry.addresses.as_ref(), max_depth)?;
    }

    if let Some(overrides) = overrides {
        apply_overrides(&mut metadata, overrides, max_depth)?;
    }

    let mut warp_route_configs = Mapping::new();
    for route in &warp_routes {
        let key = Value::String(route.id.clone());
        if warp_route_configs.contains_key(&key) {
            warn!("Warp route '{}' is declared more than once", route.id);
        }
        insert_merged(&mut warp_route_configs, key, Some(&route.config), max_depth)?;
    }

    debug!(
        "Combined {} chains ({} with addresses) and {} warp routes",
        metadata.len(),
        addresses.len(),
        warp_route_configs.len()
    );

    Ok(Registry {
        chains,
        warp_routes,
        metadata,
        addresses,
        warp_route_configs,
    })
}

/// Merge `overrides` over the combined metadata, chain by chain.
pub fn apply_overrides(metadata: &mut Mapping, overrides: &Value, max_depth: usize) -> Result<()> {
    let Some(overrides) = overrides.as_mapping() else {
        warn!("Overrides document is not a mapping, ignoring it");
        return Ok(());
    };

    for (name, patch) in overrides {
        match metadata.get(name) {
            Some(current) => {
                let merged = obj_merge(current, patch, max_depth)?;
                debug!("Applied overrides to chain {:?}", name);
                metadata.insert(name.clone(), merged);
            }
            None => warn!("Overrides name unknown chain {:?}, ignoring", name),
        }
    }
    Ok(())
}

fn insert_merged(
    target: &mut Mapping,
    key: Value,
    value: Option<&Value>,
    max_depth: usize,
) -> Result<()> {
    if let Some(merged) = obj_merge_opt(target.get(&key), value, max_depth)? {
        target.insert(key, merged);
    }
    Ok(())
}
