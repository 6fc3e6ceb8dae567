//! YAML and JSON serialization helpers
//!
//! Chain documents are read as [`serde_yaml::Value`] and written back out as
//! YAML (combined registry files) or pretty JSON (per-chain assets). The
//! combined files sort their mapping keys so regenerating them from the same
//! inputs produces the same bytes.

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Parse a YAML document, requiring it to be a mapping.
///
/// `what` names the document in the error message.
pub fn parse_mapping(content: &str, what: &str) -> Result<Value> {
    let value: Value = serde_yaml::from_str(content)?;
    match value {
        Value::Mapping(_) => Ok(value),
        other => Err(Error::Serialization {
            message: format!(
                "{} must be a mapping, found {}",
                what,
                type_name(&other)
            ),
        }),
    }
}

/// Recursively sort every mapping by key.
///
/// Sequences keep their element order; their elements are sorted in turn.
pub fn sort_mapping_entries(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut entries: Vec<(&Value, &Value)> = map.iter().collect();
            entries.sort_by_key(|(key, _)| sort_key(key));
            Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_mapping_entries(v)))
                    .collect::<Mapping>(),
            )
        }
        Value::Sequence(items) => Value::Sequence(items.iter().map(sort_mapping_entries).collect()),
        Value::Tagged(tagged) => {
            let mut tagged = tagged.as_ref().clone();
            tagged.value = sort_mapping_entries(&tagged.value);
            Value::Tagged(Box::new(tagged))
        }
        other => other.clone(),
    }
}

/// Serialize a document to YAML with sorted keys and an optional first line.
pub fn to_yaml_string(value: &Value, prefix: Option<&str>) -> Result<String> {
    let body = serde_yaml::to_string(&sort_mapping_entries(value))?;
    Ok(match prefix {
        Some(prefix) => format!("{}\n{}", prefix, body),
        None => body,
    })
}

/// Serialize a document as two-space indented JSON.
///
/// Fails when the document has mapping keys JSON cannot represent.
pub fn to_json_pretty(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Serialization {
        message: format!("cannot convert document to JSON: {}", e),
    })
}

/// Human-readable name of a value's variant.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn sort_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other).unwrap_or_default(),
    }
}
