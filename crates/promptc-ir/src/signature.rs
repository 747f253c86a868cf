//! Deterministic content signature over the canonical IR.
//!
//! The canonical form is compact JSON with object keys sorted recursively, so
//! the token only depends on IR content, never on field declaration order or
//! map iteration order. Used for caching and diffing, not for security.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Length of the signature token in hex characters.
pub const SIGNATURE_LEN: usize = 16;

/// Key excluded from the canonical form at the top level.
pub const SIGNATURE_KEY: &str = "signature";

/// Compute the signature of a serializable IR record.
pub fn compute<T: Serialize>(ir: &T) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(ir)?;
    compute_value(&value)
}

/// Compute the signature of an IR document, ignoring any top-level `signature` key.
pub fn compute_value(value: &Value) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(value)?;
    let digest = Sha256::digest(canonical.as_bytes());
    let mut token = hex::encode(digest);
    token.truncate(SIGNATURE_LEN);
    Ok(token)
}

/// Render `value` canonically, without its top-level `signature` key.
pub fn canonical_json(value: &Value) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    match value {
        Value::Object(map) => {
            let stripped = map
                .iter()
                .filter(|(k, _)| k.as_str() != SIGNATURE_KEY)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            write_canonical(&Value::Object(stripped), &mut out)?;
        }
        other => write_canonical(other, &mut out)?,
    }
    Ok(out)
}

fn write_canonical(value: &Value, out: &mut String) -> Result<(), serde_json::Error> {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                if let Some(v) = map.get(key) {
                    write_canonical(v, out)?;
                }
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

/// Check the `signature` key of an IR document against its content.
///
/// Returns `Ok(None)` when the document carries no signature.
pub fn verify_value(value: &Value) -> Result<Option<bool>, serde_json::Error> {
    let Some(stored) = value.get(SIGNATURE_KEY).and_then(Value::as_str) else {
        return Ok(None);
    };
    Ok(Some(compute_value(value)? == stored))
}
