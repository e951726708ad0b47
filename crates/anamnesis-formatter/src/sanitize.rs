//! Object Sanitizer: drops empty values at every depth.
//!
//! A value is empty when it is `null`, a blank string, an array with no
//! non-empty element, or an object with no non-empty value. Numbers and
//! booleans are never empty, `0` and `false` included.

use std::collections::BTreeMap;

use serde_json::Value;

pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.iter().all(is_empty_value),
        Value::Object(map) => map.values().all(is_empty_value),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Clean a form payload or section body. Anything other than an object
/// cleans to an empty map.
pub fn clean(value: &Value) -> BTreeMap<String, Value> {
    match value {
        Value::Object(map) => clean_entries(map),
        _ => BTreeMap::new(),
    }
}

pub fn clean_map(map: &BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    clean_entries(map)
}

fn clean_entries<'a>(
    entries: impl IntoIterator<Item = (&'a String, &'a Value)>,
) -> BTreeMap<String, Value> {
    entries
        .into_iter()
        .filter_map(|(key, value)| clean_value(value).map(|v| (key.clone(), v)))
        .collect()
}

/// The cleaned form of `value`, or `None` when nothing non-empty remains.
pub fn clean_value(value: &Value) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let cleaned: serde_json::Map<String, Value> = map
                .iter()
                .filter_map(|(key, v)| clean_value(v).map(|v| (key.clone(), v)))
                .collect();
            (!cleaned.is_empty()).then_some(Value::Object(cleaned))
        }
        Value::Array(items) => {
            let cleaned: Vec<Value> = items.iter().filter_map(clean_value).collect();
            (!cleaned.is_empty()).then_some(Value::Array(cleaned))
        }
        other if is_empty_value(other) => None,
        other => Some(other.clone()),
    }
}
