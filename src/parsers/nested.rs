//! Flattening of JSON payloads embedded in string fields
//!
//! Logging frameworks frequently serialize a structured payload into the `message`
//! field, sometimes more than once. [`flatten_json_string`] undoes that encoding and
//! produces dotted-path keys such as `message.user.id`.
//!
//! Recursion is bounded by `max_depth`. Past the boundary the remaining structure is
//! kept as literal JSON text under the key where expansion stopped, so nothing is
//! lost and adversarial input cannot recurse without limit.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::resolver::integer_text;

/// Flatten `text` into `result`, keyed below `prefix`
///
/// - Past `max_depth`, or when `text` is not a JSON object, `text` is stored verbatim
///   under `prefix`.
/// - Otherwise every member of the object is stored under `prefix.key` (or `key`
///   when the prefix is empty).
pub fn flatten_json_string(
    text: &str,
    prefix: &str,
    result: &mut HashMap<String, String>,
    max_depth: usize,
    current_depth: usize,
) {
    if current_depth > max_depth {
        result.insert(prefix.to_string(), text.to_string());
        return;
    }

    let Some(object) = try_parse_object(text) else {
        result.insert(prefix.to_string(), text.to_string());
        return;
    };

    for (key, value) in &object {
        let child_key = child_key(prefix, key);
        flatten_value(value, child_key, result, max_depth, current_depth);
    }
}

/// Store one decoded member, expanding nested structure while depth allows
fn flatten_value(
    value: &Value,
    key: String,
    result: &mut HashMap<String, String>,
    max_depth: usize,
    current_depth: usize,
) {
    match value {
        Value::String(s) => {
            if try_parse_object(s).is_some() {
                flatten_json_string(s, &key, result, max_depth, current_depth + 1);
            } else {
                result.insert(key, s.clone());
            }
        }
        Value::Number(n) => {
            result.insert(key, integer_text(n));
        }
        Value::Bool(b) => {
            result.insert(key, b.to_string());
        }
        Value::Object(object) => {
            if current_depth < max_depth {
                for (sub_key, sub_value) in object {
                    let sub_key = child_key(&key, sub_key);
                    flatten_value(sub_value, sub_key, result, max_depth, current_depth + 1);
                }
            } else {
                result.insert(key, value.to_string());
            }
        }
        Value::Null => {
            result.insert(key, String::new());
        }
        Value::Array(_) => {
            result.insert(key, value.to_string());
        }
    }
}

fn child_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() { key.to_string() } else { format!("{}.{}", prefix, key) }
}

/// Parse `text` as a JSON object; scalars, arrays and invalid JSON yield `None`
fn try_parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}
