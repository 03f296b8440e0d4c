use std::io::IsTerminal;

use clap::ValueEnum;
use crossterm::style::{Color, Stylize};

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// Painting capability used by the renderer
pub trait Palette {
    /// Wrap a whole rendered line in the color for `level` (already uppercased).
    /// Unknown levels must come back unchanged.
    fn paint_level(&self, line: &str, level: &str) -> String;

    /// Style the marker shown in place of a missing field
    fn paint_missing(&self, marker: &str) -> String;
}

/// No escape codes at all
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPalette;

impl Palette for PlainPalette {
    fn paint_level(&self, line: &str, _level: &str) -> String {
        line.to_string()
    }

    fn paint_missing(&self, marker: &str) -> String {
        marker.to_string()
    }
}

/// ANSI colors through crossterm
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiPalette;

impl Palette for AnsiPalette {
    fn paint_level(&self, line: &str, level: &str) -> String {
        match level_color(level) {
            Some(color) => line.with(color).to_string(),
            None => line.to_string(),
        }
    }

    fn paint_missing(&self, marker: &str) -> String {
        marker.with(Color::DarkGrey).to_string()
    }
}

/// Color for an uppercased severity name
pub fn level_color(level: &str) -> Option<Color> {
    match level {
        "TRACE" | "DEBUG" => Some(Color::DarkGrey),
        "INFO" => Some(Color::Green),
        "WARN" | "WARNING" => Some(Color::Yellow),
        "ERROR" => Some(Color::Red),
        "FATAL" => Some(Color::Magenta),
        _ => None,
    }
}

/// Whether output written to stdout should carry escape codes
pub fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Pick the palette for a color mode
pub fn palette_for(mode: ColorMode) -> Box<dyn Palette> {
    if use_color(mode) { Box::new(AnsiPalette) } else { Box::new(PlainPalette) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_colors() {
        assert_eq!(level_color("INFO"), Some(Color::Green));
        assert_eq!(level_color("WARN"), Some(Color::Yellow));
        assert_eq!(level_color("ERROR"), Some(Color::Red));
        assert_eq!(level_color("DEBUG"), Some(Color::DarkGrey));
        assert_eq!(level_color("FATAL"), Some(Color::Magenta));
        assert_eq!(level_color("info"), None);
        assert_eq!(level_color("NOTICE"), None);
    }

    #[test]
    fn test_plain_palette_passes_through() {
        assert_eq!(PlainPalette.paint_level("line", "ERROR"), "line");
        assert_eq!(PlainPalette.paint_missing("❓name"), "❓name");
    }

    #[test]
    fn test_ansi_palette_unknown_level_uncolored() {
        assert_eq!(AnsiPalette.paint_level("some line", "NOTICE"), "some line");
    }

    #[test]
    fn test_ansi_palette_wraps_whole_line() {
        let painted = AnsiPalette.paint_level("2024-03-20 [INFO] hi", "INFO");
        assert!(painted.contains("2024-03-20 [INFO] hi"));
    }

    #[test]
    fn test_never_mode_is_plain() {
        let palette = palette_for(ColorMode::Never);
        assert_eq!(palette.paint_level("x", "INFO"), "x");
    }
}
