//! Field-level differences between two IR documents.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::signature::SIGNATURE_KEY;

/// Objects whose keys are compared one level deeper.
const NESTED: &[&str] = &["inputs", "metadata"];

/// One changed field. `before`/`after` are `None` when the field is absent on that side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub path: String,
    pub before: Option<Value>,
    pub after: Option<Value>,
}

/// Compare two IR documents field by field, ignoring the signature.
///
/// Paths are reported in sorted order; `inputs` and `metadata` are broken down
/// into `inputs.<key>` / `metadata.<key>` entries.
pub fn diff(before: &Value, after: &Value) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    diff_object(before, after, "", 0, &mut changes);
    changes
}

fn diff_object(before: &Value, after: &Value, prefix: &str, depth: usize, out: &mut Vec<FieldChange>) {
    let keys: BTreeSet<&String> = object_keys(before).chain(object_keys(after)).collect();

    for key in keys {
        if depth == 0 && key == SIGNATURE_KEY {
            continue;
        }
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let a = before.get(key.as_str());
        let b = after.get(key.as_str());
        if a == b {
            continue;
        }

        let both_objects = matches!((a, b), (Some(Value::Object(_)), Some(Value::Object(_))));
        if depth == 0 && both_objects && NESTED.contains(&key.as_str()) {
            if let (Some(a), Some(b)) = (a, b) {
                diff_object(a, b, &path, depth + 1, out);
            }
            continue;
        }

        out.push(FieldChange {
            path,
            before: a.cloned(),
            after: b.cloned(),
        });
    }
}

fn object_keys(value: &Value) -> impl Iterator<Item = &String> {
    value.as_object().into_iter().flat_map(|m| m.keys())
}
