//! Template-driven rendering of resolved fields
//!
//! - [`Template`] - Compiled format string with ordered placeholders
//! - [`render`] - Substitution with the missing-field policy and level coloring
//! - [`Palette`] - Painting capability; [`AnsiPalette`] uses crossterm, [`PlainPalette`] is a no-op

pub mod builtin;
pub mod colors;
pub mod renderer;
pub mod template;

pub use builtin::{BUILTIN_TEMPLATES, find_template};
pub use colors::{AnsiPalette, ColorMode, Palette, PlainPalette, palette_for};
pub use renderer::{MISSING_MARKER, render};
pub use template::{Modifier, Placeholder, Segment, Template};
