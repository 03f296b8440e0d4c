//! Data models shared by the processing pipeline
//!
//! - [`Record`] - One decoded JSON log line
//! - [`ResolvedFields`] - String values extracted from a record for matching and rendering

pub mod record;

pub use record::{Record, ResolvedFields};
