//! # Chain Registry Library
//!
//! This library builds the assets of a chain registry: a directory per chain
//! holding its metadata, contract addresses and logo, plus warp route
//! configs. It is used by the `chain-registry` command-line tool but the
//! building blocks are usable on their own.
//!
//! ## Quick Example
//!
//! ```
//! use chain_registry::merge::obj_merge_default;
//! use chain_registry::yaml::to_yaml_string;
//!
//! let base: serde_yaml::Value = serde_yaml::from_str("name: base\nblocks: {confirmations: 1}").unwrap();
//! let patch: serde_yaml::Value = serde_yaml::from_str("blocks: {confirmations: 3}").unwrap();
//!
//! let merged = obj_merge_default(&base, &patch).unwrap();
//! let text = to_yaml_string(&merged, None).unwrap();
//! assert_eq!(text, "blocks:\n  confirmations: 3\nname: base\n");
//! ```
//!
//! ## Core Concepts
//!
//! - **Deep merge (`merge`)**: right-biased recursive merge of YAML
//!   documents with a hard depth bound.
//! - **Bounded concurrency (`concurrent`)**: order-preserving parallel map
//!   that runs at most N items at a time, batch after batch.
//! - **Artifacts (`artifacts`)**: every output is rendered in memory first,
//!   which makes dry runs and deterministic output straightforward.
//! - **Phases (`phases`)**: discovery, loading, combining, emitting, staging
//!   and writing, coordinated by `phases::orchestrator`.
//! - **Migration (`migrate`)**: splits combined documents back into
//!   per-chain directories.

pub mod artifacts;
pub mod codegen;
pub mod concurrent;
pub mod config;
pub mod defaults;
pub mod error;
pub mod merge;
pub mod migrate;
pub mod output;
pub mod path;
pub mod phases;
pub mod yaml;

#[cfg(test)]
mod merge_proptest;
