//! Deep merge of YAML documents
//!
//! Chain metadata, addresses and overrides are all nested mappings parsed
//! from YAML. This module reconciles two such documents into a new one where
//! the right-hand side wins every conflict.
//!
//! ## Rules
//!
//! - Mapping vs mapping: the result holds the union of keys. Keys present on
//!   both sides are merged recursively; keys present on one side are copied.
//! - Anything else (scalars, sequences, mapping vs non-mapping): the
//!   right-hand value replaces the left one. Sequences are never merged
//!   element-wise.
//! - Absence is `None` (see [`obj_merge_opt`]): an absent right-hand value
//!   never erases a left-hand one. YAML `null` is a value and does overwrite.
//! - Every descent into a pair of mappings consumes one unit of the depth
//!   bound. Reaching a pair of mappings with no depth left is an
//!   [`Error::DepthExceeded`], never a silent truncation.
//!
//! ## Example
//!
//! ```
//! use chain_registry::merge::{obj_merge, DEFAULT_MAX_DEPTH};
//!
//! let base: serde_yaml::Value = serde_yaml::from_str("rpc: {http: a, ws: b}").unwrap();
//! let overlay: serde_yaml::Value = serde_yaml::from_str("rpc: {http: c}").unwrap();
//!
//! let merged = obj_merge(&base, &overlay, DEFAULT_MAX_DEPTH).unwrap();
//! assert_eq!(merged["rpc"]["http"].as_str(), Some("c"));
//! assert_eq!(merged["rpc"]["ws"].as_str(), Some("b"));
//! ```

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Default number of nested mapping levels a merge may descend into.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Recursively merge `b` over `a`, returning a new document.
///
/// Neither input is modified. With `max_depth` of 10, two documents nested
/// ten mappings deep merge fine and eleven levels fail.
///
/// # Errors
///
/// Returns [`Error::DepthExceeded`] when the merge reaches a pair of mappings
/// with no depth left.
pub fn obj_merge(a: &Value, b: &Value, max_depth: usize) -> Result<Value> {
    merge_values(a, b, max_depth, max_depth)
}

/// [`obj_merge`] with [`DEFAULT_MAX_DEPTH`].
pub fn obj_merge_default(a: &Value, b: &Value) -> Result<Value> {
    obj_merge(a, b, DEFAULT_MAX_DEPTH)
}

/// Merge two possibly-absent documents.
///
/// An absent `b` falls back to `a`, an absent `a` yields `b`, and two present
/// values go through [`obj_merge`].
pub fn obj_merge_opt(
    a: Option<&Value>,
    b: Option<&Value>,
    max_depth: usize,
) -> Result<Option<Value>> {
    match (a, b) {
        (Some(a), Some(b)) => obj_merge(a, b, max_depth).map(Some),
        (a, b) => Ok(b.or(a).cloned()),
    }
}

fn merge_values(a: &Value, b: &Value, remaining: usize, bound: usize) -> Result<Value> {
    match (a, b) {
        (Value::Mapping(a_map), Value::Mapping(b_map)) => {
            merge_mappings(a_map, b_map, remaining, bound).map(Value::Mapping)
        }
        _ => Ok(b.clone()),
    }
}

fn merge_mappings(a: &Mapping, b: &Mapping, remaining: usize, bound: usize) -> Result<Mapping> {
    if remaining == 0 {
        return Err(Error::DepthExceeded { max_depth: bound });
    }

    let mut result = Mapping::with_capacity(a.len() + b.len());

    // a's keys keep their position, b-only keys follow in b's order
    for (key, a_value) in a {
        let merged = match b.get(key) {
            Some(b_value) => merge_values(a_value, b_value, remaining - 1, bound)?,
            None => a_value.clone(),
        };
        result.insert(key.clone(), merged);
    }

    for (key, b_value) in b {
        if !a.contains_key(key) {
            result.insert(key.clone(), b_value.clone());
        }
    }

    Ok(result)
}
