//! # CLI Command Implementations
//!
//! One module per subcommand of the `chain-registry` command-line tool.
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args`, calls into the
//!   `chain_registry` library and reports the result.

pub mod build;
pub mod completions;
pub mod merge;
pub mod migrate;
