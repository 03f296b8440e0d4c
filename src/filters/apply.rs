use super::ast::FilterSet;
use crate::models::ResolvedFields;

/// Check whether every constraint holds for the resolved fields
///
/// An empty set matches vacuously. Otherwise each constrained field must be
/// present with exactly the expected string; there are no wildcards and no
/// partial matches.
pub fn matches(fields: &ResolvedFields, constraints: &FilterSet) -> bool {
    constraints.iter().all(|(field, expected)| fields.get(field) == Some(expected))
}

/// Decide whether a record passes the include filters and avoids the excludes
pub fn is_accepted(fields: &ResolvedFields, filters: &FilterSet, excludes: &FilterSet) -> bool {
    if !matches(fields, filters) {
        return false;
    }
    excludes.is_empty() || !matches(fields, excludes)
}
