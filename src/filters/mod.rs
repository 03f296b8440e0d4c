//! Include/exclude predicates over resolved fields
//!
//! Constraints are plain `field=value` equalities combined with AND. The same
//! matcher serves both directions: a record is shown when it matches the filters
//! and does not match the excludes.

pub mod apply;
pub mod ast;
pub mod parser;

pub use apply::{is_accepted, matches};
pub use ast::{FieldFilter, FilterSet};
pub use parser::{parse_filter, parse_filter_args};
