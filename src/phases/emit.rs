//! Phase 4: Emitting
//!
//! Renders every output of the build into an [`ArtifactSet`]. Nothing is
//! written here; the write phase flushes the set afterwards.
//!
//! ## Outputs
//!
//! Per chain (rendered in parallel batches, paths keyed by directory name):
//! - `dist/chains/<dir>/metadata.yaml` - the source file, verbatim
//! - `dist/chains/<dir>/metadata.json`
//! - `dist/chains/<dir>/addresses.yaml` and `addresses.json`, when present
//! - `dist/chains/<dir>/logo.svg`, when present
//! - `tmp/chains/<dir>/metadata.ts` and `addresses.ts`
//!
//! Per warp route:
//! - `dist/deployments/warp_routes/<id>-config.yaml` and `-config.json`
//! - `tmp/deployments/warp_routes/<id>.ts`
//!
//! Combined:
//! - `chains/metadata.yaml` and `chains/addresses.yaml`, sorted, with the
//!   auto-generated header
//! - `tmp/chains/metadata.ts` and `tmp/chains/addresses.ts`
//! - `dist/deployments/warp_routes/warpRouteConfigs.yaml`, when any routes exist

use std::num::NonZeroUsize;

use serde_yaml::Value;

use super::{ChainEntry, Registry, WarpRoute, ADDRESSES_FILE, LOGO_FILE, METADATA_FILE};
use crate::artifacts::{ArtifactSet, OutputRoot};
use crate::codegen;
use crate::concurrent::concurrent_map;
use crate::defaults::AUTO_GEN_PREFIX;
use crate::error::Result;
use crate::yaml::{to_json_pretty, to_yaml_string};

const WARP_ROUTES_PREFIX: &str = "deployments/warp_routes";

/// Executes Phase 4 of the pipeline.
pub fn execute(
    registry: &Registry,
    sdk_package: &str,
    concurrency: NonZeroUsize,
) -> Result<ArtifactSet> {
    let mut artifacts = ArtifactSet::new();

    let per_chain = concurrent_map(concurrency, &registry.chains, |entry, _| {
        render_chain(entry, sdk_package)
    })?;
    for set in per_chain {
        artifacts.extend(set);
    }

    let per_route = concurrent_map(concurrency, &registry.warp_routes, |route, _| {
        render_warp_route(route, sdk_package)
    })?;
    for set in per_route {
        artifacts.extend(set);
    }

    artifacts.extend(render_combined(registry, sdk_package)?);
    log::debug!("Rendered {} artifacts", artifacts.len());
    Ok(artifacts)
}

/// Render the per-chain assets and source modules of one chain.
pub fn render_chain(entry: &ChainEntry, sdk_package: &str) -> Result<ArtifactSet> {
    let mut set = ArtifactSet::new();
    let dir = format!("chains/{}", entry.dir_name);

    set.add_string(
        OutputRoot::Dist,
        format!("{}/{}", dir, METADATA_FILE),
        &entry.metadata_source,
    );
    set.add_string(
        OutputRoot::Dist,
        format!("{}/metadata.json", dir),
        &to_json_pretty(&entry.metadata)?,
    );
    set.add_string(
        OutputRoot::Tmp,
        format!("{}/metadata.ts", dir),
        &codegen::gen_chain_metadata_export(&entry.metadata, sdk_package)?,
    );

    if let (Some(addresses), Some(source)) = (&entry.addresses, &entry.addresses_source) {
        set.add_string(
            OutputRoot::Dist,
            format!("{}/{}", dir, ADDRESSES_FILE),
            source,
        );
        set.add_string(
            OutputRoot::Dist,
            format!("{}/addresses.json", dir),
            &to_json_pretty(addresses)?,
        );
        set.add_string(
            OutputRoot::Tmp,
            format!("{}/addresses.ts", dir),
            &codegen::gen_chain_addresses_export(addresses)?,
        );
    }

    if let Some(logo) = &entry.logo {
        set.add_bytes(OutputRoot::Dist, format!("{}/{}", dir, LOGO_FILE), logo.clone());
    }

    Ok(set)
}

/// Render the assets and source module of one warp route.
pub fn render_warp_route(route: &WarpRoute, sdk_package: &str) -> Result<ArtifactSet> {
    let mut set = ArtifactSet::new();
    let base = format!("{}/{}", WARP_ROUTES_PREFIX, route.id);

    set.add_string(OutputRoot::Dist, format!("{}-config.yaml", base), &route.source);
    set.add_string(
        OutputRoot::Dist,
        format!("{}-config.json", base),
        &to_json_pretty(&route.config)?,
    );
    set.add_string(
        OutputRoot::Tmp,
        format!("{}.ts", base),
        &codegen::gen_warp_route_config_export(&route.config, sdk_package)?,
    );
    Ok(set)
}

/// Render the combined registry documents and modules.
pub fn render_combined(registry: &Registry, sdk_package: &str) -> Result<ArtifactSet> {
    let mut set = ArtifactSet::new();
    let metadata = Value::Mapping(registry.metadata.clone());
    let addresses = Value::Mapping(registry.addresses.clone());

    set.add_string(
        OutputRoot::Chains,
        METADATA_FILE,
        &to_yaml_string(&metadata, Some(AUTO_GEN_PREFIX))?,
    );
    set.add_string(
        OutputRoot::Chains,
        ADDRESSES_FILE,
        &to_yaml_string(&addresses, Some(AUTO_GEN_PREFIX))?,
    );

    set.add_string(
        OutputRoot::Tmp,
        "chains/metadata.ts",
        &codegen::gen_record_export(&metadata, "chainMetadata", "ChainMetadata", sdk_package)?,
    );
    set.add_string(
        OutputRoot::Tmp,
        "chains/addresses.ts",
        &codegen::gen_export(&addresses, "chainAddresses")?,
    );

    if !registry.warp_route_configs.is_empty() {
        let configs = Value::Mapping(registry.warp_route_configs.clone());
        set.add_string(
            OutputRoot::Dist,
            format!("{}/warpRouteConfigs.yaml", WARP_ROUTES_PREFIX),
            &to_yaml_string(&configs, Some(AUTO_GEN_PREFIX))?,
        );
    }

    Ok(set)
}
