use std::collections::HashMap;

use serde_json::{Map, Value};

/// One decoded input line: JSON object keys to dynamically typed values
pub type Record = Map<String, Value>;

/// Field name to string value, built fresh for every record
///
/// Keys are placeholder keys (`level`, `file|basename`), explicitly requested
/// field names, or flattened paths such as `message.user.id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFields {
    values: HashMap<String, String>,
}

impl ResolvedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for `key` when it is present and non-empty
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolvedFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_fields_lookup() {
        let fields: ResolvedFields = [("level", "INFO"), ("name", "")].into_iter().collect();
        assert_eq!(fields.get("level"), Some("INFO"));
        assert_eq!(fields.get("name"), Some(""));
        assert_eq!(fields.non_empty("name"), None);
        assert_eq!(fields.get("absent"), None);
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut fields = ResolvedFields::new();
        assert!(fields.is_empty());
        fields.insert("message", "raw");
        fields.insert("message", "decoded");
        assert_eq!(fields.get("message"), Some("decoded"));
        assert!(fields.contains_key("message"));
    }
}
