use anyhow::{Result, bail};
use serde_json::Value;

use crate::models::Record;

/// Parse one input line into a record
///
/// The line must hold a JSON object; arrays and scalars are rejected just like
/// malformed JSON so the caller can report the line and move on.
pub fn parse_record(line: &str) -> Result<Record> {
    match serde_json::from_str::<Value>(line)? {
        Value::Object(record) => Ok(record),
        other => bail!("expected a JSON object, found {}", json_type_name(&other)),
    }
}

/// Short name of a JSON value's type, as shown by `inspect`
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
        Value::Object(_) => "object",
        Value::Array(_) => "array",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_record() {
        let record = parse_record(r#"{"level":"INFO","pid":42}"#).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record["level"], "INFO");
    }

    #[test]
    fn test_parse_keeps_source_key_order() {
        let record = parse_record(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_record("invalid json").is_err());
        assert!(parse_record(r#"{"level": "INFO""#).is_err());
        assert!(parse_record("").is_err());
    }

    #[test]
    fn test_parse_non_object_json() {
        let err = parse_record("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("found array"));
        assert!(parse_record("\"just a string\"").is_err());
        assert!(parse_record("null").is_err());
    }
}
