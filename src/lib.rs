//! jclog - Render newline-delimited JSON logs as human-readable lines
//!
//! Each input line is decoded as a JSON object, its fields are resolved through
//! an alias table, JSON nested inside the `message` field can be expanded into
//! dotted keys, and accepted records are rendered through a format template:
//!
//! - Resolving `level`, `lvl` or `severity` for a `{level}` placeholder
//! - Filtering with `field=value` include and exclude constraints
//! - Hiding or marking missing fields, collapsing `[{x}]` groups
//! - Coloring whole lines by severity
//!
//! # Example
//!
//! ```
//! use jclog::{Pipeline, PipelineOptions, PlainPalette};
//!
//! let options = PipelineOptions {
//!     format: "{timestamp} [{level}] {message}".to_string(),
//!     ..PipelineOptions::default()
//! };
//! let pipeline = Pipeline::new(options, Box::new(PlainPalette));
//!
//! let mut out = Vec::new();
//! pipeline.run(r#"{"ts":"10:00","lvl":"INFO","msg":"ready"}"#.as_bytes(), &mut out)?;
//! assert_eq!(String::from_utf8(out)?, "10:00 [INFO] ready\n");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod filters;
pub mod inspect;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, PipelineOptions, Profile};
pub use filters::{FilterSet, parse_filter_args};
pub use models::{Record, ResolvedFields};
pub use parsers::{AliasTable, flatten_json_string, resolve_field};
pub use pipeline::{LineOutcome, Pipeline, RunStats};
pub use render::{AnsiPalette, Palette, PlainPalette, Template, render};
