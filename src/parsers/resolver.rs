use serde_json::{Number, Value};

use super::aliases::AliasTable;
use crate::models::Record;

/// Resolve `field` against a record, trying its aliases in order
///
/// Returns the string form of the first alias holding a string, number or boolean.
/// Absent fields and values of other types (null, objects, arrays) resolve to `""`,
/// which the renderer treats as missing.
pub fn resolve_field(record: &Record, field: &str, aliases: &AliasTable) -> String {
    for key in aliases.candidates(field) {
        if let Some(text) = record.get(key).and_then(scalar_text) {
            return text;
        }
    }
    String::new()
}

/// String form of a scalar JSON value, `None` for null and containers
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(integer_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    }
}

/// Render a JSON number without a decimal point
///
/// Log fields such as levels, pids and status codes are integers, but any
/// fractional part that does show up is truncated rather than rounded.
pub fn integer_text(number: &Number) -> String {
    if let Some(i) = number.as_i64() {
        return i.to_string();
    }
    if let Some(u) = number.as_u64() {
        return u.to_string();
    }

    let f = number.as_f64().unwrap_or_default().trunc();
    if f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        (f as i64).to_string()
    } else {
        format!("{:.0}", f)
    }
}
