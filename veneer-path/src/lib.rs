//! Dotted-path plumbing over `serde_json::Value`.
//!
//! A path like `"attributes.bar"` names a location inside a nested JSON
//! structure. This crate provides the three primitives the model layer is
//! built on:
//! - [`split`] — turn a dotted string into its segments
//! - [`resolve`] — read the value at a path, if one is present
//! - [`insert`] — write a value at a path, creating intermediate objects
//!
//! Resolution is total: walking through a `null` or missing branch yields
//! `None` rather than an error, which is what lets the model layer treat
//! "not found" as "leave the field unset."

use serde_json::{Map, Value};

/// Splits a dotted path into its segments, dropping empty ones.
///
/// `".foo"` and `"foo"` are equivalent, as are `"foo..bar"` and `"foo.bar"`.
#[must_use]
pub fn split(path: &str) -> Vec<String> {
    path.split('.')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Resolves a pre-split path against a JSON value.
///
/// Walks one segment at a time. Stops and returns `None` the moment the
/// current value is `null` — so `a.b.c` against `{"a": null}` is simply
/// absent, never an error. Objects are indexed by key; arrays by numeric
/// segment. Indexing into a scalar yields `None`.
///
/// A terminal `null` is still a present value: `resolve` returns
/// `Some(&Value::Null)` for it, distinct from an absent path.
#[must_use]
pub fn resolve<'a>(root: &'a Value, segments: &[String]) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments {
        if current.is_null() {
            return None;
        }
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Inserts `leaf` at a pre-split path inside `root`, creating empty
/// intermediate objects as needed.
///
/// An existing intermediate object is descended into, never discarded. An
/// existing intermediate that is *not* an object is replaced by an empty
/// one, so insertion always succeeds. An empty segment list is a no-op.
pub fn insert(root: &mut Map<String, Value>, segments: &[String], leaf: Value) {
    let Some((last, intermediate)) = segments.split_last() else {
        return;
    };

    let mut current = root;
    for segment in intermediate {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        current = next;
    }
    current.insert(last.clone(), leaf);
}
