//! Command-line interface
//!
//! With no subcommand `jclog` renders records from a file or stdin; the
//! `inspect`, `config` and `template` subcommands help build a format.

pub mod commands;
pub mod profiles;
pub mod templates;

pub use commands::{Cli, Commands, RenderArgs, run};
