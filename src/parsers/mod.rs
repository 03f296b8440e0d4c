//! Record parsing and field extraction
//!
//! - [`parse_record`] turns one input line into a [`Record`](crate::models::Record)
//! - [`resolve_field`] looks a field up through the [`AliasTable`]
//! - [`flatten_json_string`] expands JSON encoded inside string fields into dotted keys
//!
//! # Error Handling Strategy
//!
//! Nothing in here fails on record content. Absent fields resolve to an empty
//! string and over-deep payloads degrade to literal text. Only [`parse_record`]
//! returns an error, and the pipeline turns that into a per-line diagnostic.

pub mod aliases;
pub mod nested;
pub mod record;
pub mod resolver;

pub use aliases::{AliasTable, LEVEL_FIELD, MESSAGE_FIELD, TIMESTAMP_FIELD};
pub use nested::flatten_json_string;
pub use record::{json_type_name, parse_record};
pub use resolver::{integer_text, resolve_field};
