use std::collections::BTreeMap;

/// Single `field=value` equality constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self { field: field.into(), value: value.into() }
    }
}

/// Set of equality constraints, all of which must hold (AND)
///
/// A later constraint on the same field replaces the earlier one.
/// An empty set matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    constraints: BTreeMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(&mut self, filter: FieldFilter) {
        self.constraints.insert(filter.field, filter.value);
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Constrained field names, in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.constraints.keys().map(String::as_str)
    }

    /// `(field, expected value)` pairs, in sorted field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constraints.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<FieldFilter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FieldFilter>>(iter: I) -> Self {
        let mut set = Self::new();
        for filter in iter {
            set.add_filter(filter);
        }
        set
    }
}
