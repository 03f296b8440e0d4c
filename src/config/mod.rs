//! Configuration profiles and resolved runtime options
//!
//! Profiles are stored as JSON, by default in `~/.jclog.json`:
//!
//! ```json
//! {
//!   "active_profile": "default",
//!   "profiles": {
//!     "default": { "format": "{time} [{level}] {msg} ({name})", "max_depth": 2 }
//!   }
//! }
//! ```
//!
//! Command-line flags take precedence over the selected profile; see
//! [`crate::cli::commands`] for the merge.

pub mod options;
pub mod persistence;
pub mod profile;

pub use options::PipelineOptions;
pub use persistence::{load_config, save_config};
pub use profile::{Config, DEFAULT_PROFILE, Profile};
