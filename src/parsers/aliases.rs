use std::collections::HashMap;

/// Canonical name of the severity field
pub const LEVEL_FIELD: &str = "level";

/// Canonical name of the message field, the one that gets flattened
pub const MESSAGE_FIELD: &str = "message";

/// Canonical name of the timestamp field
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Mapping from canonical field name to the source keys accepted for it
///
/// The first key of every list is the canonical name itself. Lookups try the
/// keys in list order, so `{"msg": "a", "message": "b"}` resolves `message` to `b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, Vec<String>>,
}

impl AliasTable {
    /// Create an empty table: every field is only its own alias
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Register a canonical name with its accepted source keys.
    /// The canonical name is prepended when the list doesn't start with it.
    pub fn with_entry(mut self, canonical: &str, aliases: &[&str]) -> Self {
        let mut keys = Vec::with_capacity(aliases.len() + 1);
        if aliases.first() != Some(&canonical) {
            keys.push(canonical.to_string());
        }
        keys.extend(aliases.iter().map(|a| a.to_string()));
        self.entries.insert(canonical.to_string(), keys);
        self
    }

    /// Source keys to try for `field`, in order
    pub fn candidates<'a>(&'a self, field: &'a str) -> Vec<&'a str> {
        match self.entries.get(field) {
            Some(keys) => keys.iter().map(String::as_str).collect(),
            None => vec![field],
        }
    }

    /// Aliases to display for a key found in a record:
    /// the other spellings for a canonical name, or the canonical name for an alias
    pub fn related(&self, key: &str) -> Vec<&str> {
        if let Some(keys) = self.entries.get(key) {
            return keys.iter().skip(1).map(String::as_str).collect();
        }

        for (canonical, keys) in &self.entries {
            if keys.iter().any(|k| k == key) {
                return vec![canonical.as_str()];
            }
        }

        Vec::new()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::empty()
            .with_entry(TIMESTAMP_FIELD, &["timestamp", "time", "ts"])
            .with_entry(LEVEL_FIELD, &["level", "lvl", "severity"])
            .with_entry(MESSAGE_FIELD, &["message", "msg", "text"])
    }
}
