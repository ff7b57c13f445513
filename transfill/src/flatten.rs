//! Flattening nested translation trees into dotted-path keys and back.
//!
//! `{ "home": { "title": "Welcome" } }` flattens to `home.title = "Welcome"`,
//! and [`set_nested`] is the inverse used when filling gaps.
//!
//! # Known limitation
//!
//! A literal `.` inside a single JSON key is indistinguishable from nesting:
//! `{ "a.b": "x" }` and `{ "a": { "b": "x" } }` both flatten to the key
//! `a.b`, and [`set_nested`] always rebuilds the nested form. No
//! disambiguation is attempted.

use indexmap::IndexMap;
use serde_json::Value;

use crate::types::{FlatKey, TranslationTree};

/// Flattens a tree into a map from dotted-path keys to leaf values,
/// preserving the tree's depth-first insertion order.
///
/// Objects are descended into; strings and every other value (arrays
/// included, treated as opaque leaves) terminate a path. An empty tree
/// yields an empty map.
pub fn flatten(tree: &TranslationTree) -> IndexMap<FlatKey, String> {
    let mut flat = IndexMap::new();
    flatten_into(tree, "", &mut flat);
    flat
}

fn flatten_into(tree: &TranslationTree, prefix: &str, flat: &mut IndexMap<FlatKey, String>) {
    for (key, value) in tree {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(child) => flatten_into(child, &path, flat),
            other => {
                flat.insert(path, leaf_as_text(other));
            }
        }
    }
}

/// String form of a leaf. Non-string leaves keep their JSON rendering.
fn leaf_as_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Writes `value` at the leaf position addressed by `flat_key`, creating
/// intermediate levels as needed.
///
/// An intermediate segment already holding a leaf value is silently replaced
/// by a new subtree; avoiding that is the caller's responsibility.
pub fn set_nested(tree: &mut TranslationTree, flat_key: &str, value: &str) {
    match flat_key.split_once('.') {
        None => {
            tree.insert(flat_key.to_string(), Value::String(value.to_string()));
        }
        Some((head, rest)) => {
            let slot = tree
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(TranslationTree::new()));
            if !slot.is_object() {
                *slot = Value::Object(TranslationTree::new());
            }
            if let Value::Object(child) = slot {
                set_nested(child, rest, value);
            }
        }
    }
}
