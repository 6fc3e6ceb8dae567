//! # Build Configuration
//!
//! This module defines [`BuildConfig`], the settings of a registry build, and
//! the logic for loading it from a YAML file. Every field is optional in the
//! file; anything left out falls back to the values in [`crate::defaults`].
//!
//! ```yaml
//! chains-dir: chains
//! dist-dir: dist
//! tmp-dir: tmp
//! src-dir: src
//! warp-routes-dir: deployments/warp_routes
//! concurrency: 8
//! max-merge-depth: 10
//! overrides: overrides.yaml
//! sdk-package: "@hyperlane-xyz/sdk"
//! ```
//!
//! The CLI layers its own flags on top of the loaded file, so the file acts
//! as a project-level default rather than the final word.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::defaults;
use crate::error::{Error, Result};
use crate::merge::DEFAULT_MAX_DEPTH;
use crate::path::paths_overlap;

/// Settings for one registry build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory with one sub-directory per chain.
    pub chains_dir: PathBuf,
    /// Output directory for distributable assets.
    pub dist_dir: PathBuf,
    /// Staging directory for generated source modules.
    pub tmp_dir: PathBuf,
    /// Source tree copied into `tmp_dir` before generation.
    pub src_dir: PathBuf,
    /// Directory holding warp route configs.
    pub warp_routes_dir: PathBuf,
    /// How many chains are loaded, rendered and written at once.
    pub concurrency: usize,
    /// Depth bound handed to every merge.
    pub max_merge_depth: usize,
    /// Optional document of per-chain metadata overrides.
    pub overrides: Option<PathBuf>,
    /// Package generated modules import their types from.
    pub sdk_package: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            chains_dir: PathBuf::from(defaults::DEFAULT_CHAINS_DIR),
            dist_dir: PathBuf::from(defaults::DEFAULT_DIST_DIR),
            tmp_dir: PathBuf::from(defaults::DEFAULT_TMP_DIR),
            src_dir: PathBuf::from(defaults::DEFAULT_SRC_DIR),
            warp_routes_dir: PathBuf::from(defaults::DEFAULT_WARP_ROUTES_DIR),
            concurrency: defaults::default_concurrency().get(),
            max_merge_depth: DEFAULT_MAX_DEPTH,
            overrides: None,
            sdk_package: defaults::DEFAULT_SDK_PACKAGE.to_string(),
        }
    }
}

impl BuildConfig {
    /// The concurrency bound, rejecting zero.
    pub fn concurrency(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.concurrency).ok_or_else(|| Error::ConfigParse {
            message: "concurrency must be at least 1".to_string(),
            hint: Some("Set 'concurrency' to a positive number of parallel tasks".to_string()),
        })
    }

    /// Check the settings for values the build cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.concurrency()?;

        if self.sdk_package.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "sdk-package must not be empty".to_string(),
                hint: None,
            });
        }

        if self.sdk_package.contains(['\'', '\\', '\n', '\r']) {
            return Err(Error::ConfigParse {
                message: format!(
                    "sdk-package '{}' cannot be used in an import statement",
                    self.sdk_package
                ),
                hint: Some("Use a plain npm package name such as @scope/sdk".to_string()),
            });
        }

        // The staging dir is deleted on every build and the dist dir is
        // written into, so neither may overlap a directory the build reads
        let inputs = [
            ("src-dir", &self.src_dir),
            ("chains-dir", &self.chains_dir),
            ("warp-routes-dir", &self.warp_routes_dir),
        ];
        let outputs = [("tmp-dir", &self.tmp_dir), ("dist-dir", &self.dist_dir)];
        for (output_key, output) in outputs {
            for (input_key, input) in inputs {
                ensure_disjoint(output_key, output, input_key, input)?;
            }
        }
        ensure_disjoint("tmp-dir", &self.tmp_dir, "dist-dir", &self.dist_dir)?;

        Ok(())
    }
}

fn ensure_disjoint(output_key: &str, output: &Path, other_key: &str, other: &Path) -> Result<()> {
    if paths_overlap(output, other)? {
        return Err(Error::ConfigParse {
            message: format!(
                "{} '{}' overlaps {} '{}'",
                output_key,
                output.display(),
                other_key,
                other.display()
            ),
            hint: Some(format!(
                "Point '{}' at a directory of its own; it is cleared or overwritten by the build",
                output_key
            )),
        });
    }
    Ok(())
}

/// Parse a build configuration from YAML text.
///
/// An empty document yields the defaults.
pub fn parse(content: &str) -> Result<BuildConfig> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: None,
    })?;

    if value.is_null() {
        return Ok(BuildConfig::default());
    }

    let config: BuildConfig = serde_yaml::from_value(value).map_err(|e| {
        let message = e.to_string();
        let hint = message.contains("unknown field").then(|| {
            "Known keys: chains-dir, dist-dir, tmp-dir, src-dir, warp-routes-dir, \
             concurrency, max-merge-depth, overrides, sdk-package"
                .to_string()
        });
        Error::ConfigParse { message, hint }
    })?;

    config.validate()?;
    Ok(config)
}

/// Load and parse a build configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<BuildConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load a build configuration file, falling back to defaults when it does
/// not exist.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<BuildConfig> {
    let path = path.as_ref();
    if path.exists() {
        log::debug!("Loading build configuration from {}", path.display());
        from_file(path)
    } else {
        log::debug!(
            "No build configuration at {}, using defaults",
            path.display()
        );
        Ok(BuildConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
chains-dir: registry/chains
dist-dir: out
tmp-dir: staging
src-dir: lib
warp-routes-dir: registry/warp
concurrency: 4
max-merge-depth: 12
overrides: overrides.yaml
sdk-package: "@example/sdk"
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.chains_dir, PathBuf::from("registry/chains"));
        assert_eq!(config.dist_dir, PathBuf::from("out"));
        assert_eq!(config.tmp_dir, PathBuf::from("staging"));
        assert_eq!(config.src_dir, PathBuf::from("lib"));
        assert_eq!(config.warp_routes_dir, PathBuf::from("registry/warp"));
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.max_merge_depth, 12);
        assert_eq!(config.overrides, Some(PathBuf::from("overrides.yaml")));
        assert_eq!(config.sdk_package, "@example/sdk");
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = parse("concurrency: 2").unwrap();
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.chains_dir, PathBuf::from("chains"));
        assert_eq!(config.max_merge_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.overrides, None);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(parse("").unwrap(), BuildConfig::default());
        assert_eq!(parse("# nothing here\n").unwrap(), BuildConfig::default());
    }

    #[test]
    fn test_parse_rejects_zero_concurrency() {
        let err = parse("concurrency: 0").unwrap_err();
        assert!(err.to_string().contains("concurrency must be at least 1"));
    }

    #[test]
    fn test_parse_unknown_field_has_hint() {
        let err = parse("chain-dir: chains").unwrap_err();
        let display = err.to_string();
        assert!(display.contains("unknown field"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(matches!(
            parse("concurrency: [unclosed"),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_dist_in_chains_dir() {
        let config = BuildConfig {
            dist_dir: PathBuf::from("chains"),
            ..BuildConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_tmp_equal_to_src() {
        let config = BuildConfig {
            tmp_dir: PathBuf::from("./src"),
            ..BuildConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("tmp-dir"));
        assert!(err.contains("src-dir"));
    }

    #[test]
    fn test_validate_rejects_tmp_containing_inputs() {
        let config = BuildConfig {
            tmp_dir: PathBuf::from("."),
            ..BuildConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BuildConfig {
            tmp_dir: PathBuf::from("deployments"),
            ..BuildConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_outputs_inside_inputs() {
        let config = BuildConfig {
            tmp_dir: PathBuf::from("chains/../src/generated"),
            ..BuildConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BuildConfig {
            dist_dir: PathBuf::from("chains/dist"),
            ..BuildConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_tmp_inside_dist() {
        let config = BuildConfig {
            tmp_dir: PathBuf::from("dist/tmp"),
            ..BuildConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_default_layout() {
        assert!(BuildConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_quote_in_sdk_package() {
        let config = BuildConfig {
            sdk_package: "@evil/sdk'; import 'x".to_string(),
            ..BuildConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("sdk-package"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dist-dir: build").unwrap();
        let config = from_file(file.path()).unwrap();
        assert_eq!(config.dist_dir, PathBuf::from("build"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = load_or_default(dir.path().join("missing.yaml")).unwrap();
        assert_eq!(config, BuildConfig::default());
    }
}
