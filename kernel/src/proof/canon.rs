//! Canonical JSON bytes: the one serialization used before hashing.
//!
//! Rules:
//!
//! 1. Object keys are sorted lexicographically (byte order), at every depth.
//! 2. Compact form, no whitespace (`{"a":1,"b":2}`).
//! 3. Numbers must be integers. Floats are rejected so digests never depend
//!    on float formatting.
//! 4. Array order is preserved.

use serde_json::{Map, Value};
use thiserror::Error;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonError {
    /// A JSON number was not an integer.
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },
    /// `serde_json` failed to encode the normalized value.
    #[error("canonical JSON encoding failed: {detail}")]
    Encode { detail: String },
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not an `i64` or
/// `u64`.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    let normalized = normalize(value)?;
    serde_json::to_vec(&normalized).map_err(|e| CanonError::Encode {
        detail: e.to_string(),
    })
}

/// Serialize any `serde` value to canonical JSON bytes.
///
/// # Errors
///
/// Returns [`CanonError::Encode`] if the value cannot be represented as JSON,
/// or [`CanonError::NonIntegerNumber`] if it contains floats.
pub fn canonical_json_bytes_of<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, CanonError> {
    let value = serde_json::to_value(value).map_err(|e| CanonError::Encode {
        detail: e.to_string(),
    })?;
    canonical_json_bytes(&value)
}

// Rebuilds objects with keys inserted in sorted order, so the output is
// canonical whether or not `serde_json` preserves insertion order.
fn normalize(value: &Value) -> Result<Value, CanonError> {
    match value {
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Ok(value.clone())
            } else {
                Err(CanonError::NonIntegerNumber { raw: n.to_string() })
            }
        }
        Value::Array(items) => items
            .iter()
            .map(normalize)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for key in keys {
                out.insert(key.clone(), normalize(&map[key])?);
            }
            Ok(Value::Object(out))
        }
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value.clone()),
    }
}
