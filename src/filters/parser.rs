//! Parsing of `field=value` constraint arguments
//!
//! Filters and excludes come from repeated CLI flags or profile lists:
//!
//! ```rust
//! # use jclog::filters::parser::parse_filter_args;
//! let filters = parse_filter_args(&["level=INFO", "url=/api?a=b"]);
//! assert_eq!(filters.len(), 2);
//! ```
//!
//! Each argument is split on its first `=`, so values may contain `=` themselves.
//! Arguments without `=` are skipped with a warning.

use tracing::warn;

use super::ast::{FieldFilter, FilterSet};

/// Parse a single `field=value` argument
pub fn parse_filter(arg: &str) -> Option<FieldFilter> {
    let (field, value) = arg.split_once('=')?;
    Some(FieldFilter::new(field, value))
}

/// Parse a list of `field=value` arguments into a constraint set
pub fn parse_filter_args<S: AsRef<str>>(args: &[S]) -> FilterSet {
    let mut set = FilterSet::new();
    for arg in args {
        let arg = arg.as_ref();
        match parse_filter(arg) {
            Some(filter) => set.add_filter(filter),
            None => warn!("Ignoring filter '{}': expected field=value", arg),
        }
    }
    set
}
