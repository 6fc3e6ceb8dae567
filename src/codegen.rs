//! Source module generation
//!
//! Per-chain metadata, addresses and warp route configs are embedded into
//! TypeScript modules so SDK consumers can import them without reading YAML
//! at runtime. Each module is a single exported constant holding the
//! document as pretty JSON, optionally annotated with an SDK type.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::yaml::to_json_pretty;

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid regex"));

/// A type imported from a package and used to annotate an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportType<'a> {
    /// Type annotation, e.g. `ChainMetadata` or `Record<string, ChainMetadata>`.
    pub annotation: &'a str,
    /// Name imported with `import type`.
    pub import: &'a str,
    /// Package the type is imported from.
    pub package: &'a str,
}

impl<'a> ExportType<'a> {
    /// A plain imported type.
    pub fn new(import: &'a str, package: &'a str) -> Self {
        Self {
            annotation: import,
            import,
            package,
        }
    }
}

/// Generate `export const <name> = <json>;`.
pub fn gen_export(data: &Value, export_name: &str) -> Result<String> {
    validate_identifier(export_name)?;
    Ok(format!(
        "export const {} = {};\n",
        export_name,
        to_json_pretty(data)?
    ))
}

/// Generate an export annotated with an imported type.
pub fn gen_typed_export(data: &Value, export_name: &str, ty: &ExportType<'_>) -> Result<String> {
    validate_identifier(export_name)?;
    Ok(format!(
        "import type {{ {} }} from '{}';\n\nexport const {}: {} = {};\n",
        ty.import,
        ty.package,
        export_name,
        ty.annotation,
        to_json_pretty(data)?
    ))
}

/// Generate the module for a single chain's metadata.
pub fn gen_chain_metadata_export(data: &Value, sdk_package: &str) -> Result<String> {
    gen_typed_export(data, "metadata", &ExportType::new("ChainMetadata", sdk_package))
}

/// Generate the module for a single chain's contract addresses.
pub fn gen_chain_addresses_export(data: &Value) -> Result<String> {
    gen_export(data, "addresses")
}

/// Generate the module for a single warp route config.
pub fn gen_warp_route_config_export(data: &Value, sdk_package: &str) -> Result<String> {
    gen_typed_export(
        data,
        "warpRouteConfig",
        &ExportType::new("WarpCoreConfig", sdk_package),
    )
}

/// Generate a module exporting a record of documents keyed by name.
pub fn gen_record_export(
    data: &Value,
    export_name: &str,
    value_type: &str,
    sdk_package: &str,
) -> Result<String> {
    let annotation = format!("Record<string, {}>", value_type);
    gen_typed_export(
        data,
        export_name,
        &ExportType {
            annotation: &annotation,
            import: value_type,
            package: sdk_package,
        },
    )
}

fn validate_identifier(name: &str) -> Result<()> {
    if IDENTIFIER_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(Error::Codegen {
            export: name.to_string(),
            message: "not a valid identifier".to_string(),
        })
    }
}
