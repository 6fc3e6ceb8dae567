//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_chain("ethereum", chains::ETHEREUM);
//!     fixture.command().arg("build").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::chains;
    pub use super::TestFixture;
}

/// Chain metadata snippets for testing.
#[allow(dead_code)]
pub mod chains {
    pub const ETHEREUM: &str = r#"name: ethereum
chainId: 1
displayName: Ethereum
protocol: ethereum
blocks:
  confirmations: 1
  reorgPeriod: 14
"#;

    pub const BASE: &str = r#"name: base
chainId: 8453
displayName: Base
protocol: ethereum
"#;

    pub const ETHEREUM_ADDRESSES: &str = r#"mailbox: "0xc005dc82818d67AF737725bD4bf75435d065D239"
"#;

    /// Metadata without the required `name` field.
    pub const NAMELESS: &str = "chainId: 42\n";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "name: [unclosed\n";
}

/// A temporary registry checkout.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_chain("ethereum", chains::ETHEREUM)
///     .with_file("chains/ethereum/logo.svg", "<svg/>");
///
/// fixture.command().arg("build").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `chain-registry.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("chain-registry.yaml", content)
    }

    /// Add `chains/<dir>/metadata.yaml` with the given content.
    pub fn with_chain(self, dir: &str, metadata: &str) -> Self {
        self.with_file(&format!("chains/{}/metadata.yaml", dir), metadata)
    }

    /// Add `chains/<dir>/addresses.yaml` with the given content.
    pub fn with_addresses(self, dir: &str, addresses: &str) -> Self {
        self.with_file(&format!("chains/{}/addresses.yaml", dir), addresses)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Read a file below the fixture root.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
    }

    /// Create a command running in this fixture's directory.
    ///
    /// Logging is pinned to `info` so tests do not depend on the caller's
    /// `RUST_LOG`, and concurrency is left to the flags under test.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chain-registry");
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("CHAIN_REGISTRY_CONCURRENCY")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_chain() {
        let fixture = TestFixture::new().with_chain("base", chains::BASE);
        assert!(fixture.path().join("chains/base/metadata.yaml").exists());
    }

    #[test]
    fn test_chain_snippets_are_valid_yaml() {
        for snippet in [chains::ETHEREUM, chains::BASE, chains::ETHEREUM_ADDRESSES] {
            serde_yaml::from_str::<serde_yaml::Value>(snippet).expect("snippet should be valid YAML");
        }
        assert!(serde_yaml::from_str::<serde_yaml::Value>(chains::INVALID_YAML).is_err());
    }
}
