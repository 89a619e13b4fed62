// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Nested JSON values to flattened attributes.
//!
//! Objects recurse with `.`. Arrays record their length under `<key>.#` and
//! their elements under `<key>.<i>`. Maps held by a key record their entry
//! count under `<key>.%`; objects that are array elements are blocks and get
//! no count. `null` is omitted.

use flatcheck_core::{FlatMap, COUNT_MARKER, MAP_SIZE_MARKER};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Flatten a resource's nested `values` object.
pub fn flatten_values(values: &Map<String, Value>) -> FlatMap {
    let mut out = BTreeMap::new();
    flatten_object_into(values, &mut out);
    FlatMap::from(out)
}

pub(crate) fn flatten_object_into(values: &Map<String, Value>, out: &mut BTreeMap<String, String>) {
    for (key, value) in values {
        flatten_field(key.clone(), value, out);
    }
}

/// Text form of a JSON scalar, `None` for arrays, objects and `null`.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn flatten_field(key: String, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            out.insert(format!("{key}.{COUNT_MARKER}"), items.len().to_string());
            for (i, item) in items.iter().enumerate() {
                flatten_element(format!("{key}.{i}"), item, out);
            }
        }
        Value::Object(map) => {
            out.insert(format!("{key}.{MAP_SIZE_MARKER}"), map.len().to_string());
            for (k, v) in map {
                flatten_field(format!("{key}.{k}"), v, out);
            }
        }
        scalar => {
            if let Some(text) = scalar_text(scalar) {
                out.insert(key, text);
            }
        }
    }
}

fn flatten_element(key: String, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(block) => {
            for (k, v) in block {
                flatten_field(format!("{key}.{k}"), v, out);
            }
        }
        other => flatten_field(key, other, out),
    }
}
