//! Format template compilation
//!
//! A template is literal text with `{name}` and `{name|modifier}` placeholders:
//!
//! ```text
//! {time} [{level}] {msg} ({file|basename}:{line})
//! ```
//!
//! Compilation is a single left-to-right scan. A placeholder runs from a `{` to the
//! next `}` and must not be empty, so `{}` stays literal text. Repeated placeholders
//! are kept, every occurrence gets substituted.

use std::path::Path;

/// Transformation applied to a resolved value before substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    /// Reduce a filesystem path to its final component
    Basename,
    /// Unrecognized modifier, applied as a no-op
    Unknown(String),
}

impl Modifier {
    fn parse(name: &str) -> Self {
        match name {
            "basename" => Modifier::Basename,
            other => Modifier::Unknown(other.to_string()),
        }
    }
}

/// One `{...}` occurrence in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Full text between the braces, e.g. `file|basename`
    pub key: String,
    /// Field to resolve, e.g. `file`
    pub name: String,
    pub modifier: Option<Modifier>,
}

impl Placeholder {
    pub fn parse(key: &str) -> Self {
        match key.split_once('|') {
            Some((name, modifier)) => Self {
                key: key.to_string(),
                name: name.to_string(),
                modifier: Some(Modifier::parse(modifier)),
            },
            None => Self { key: key.to_string(), name: key.to_string(), modifier: None },
        }
    }

    /// Apply the modifier, if any, to a resolved value
    pub fn apply(&self, value: String) -> String {
        match &self.modifier {
            Some(Modifier::Basename) if !value.is_empty() => basename(&value).unwrap_or(value),
            _ => value,
        }
    }
}

fn basename(path: &str) -> Option<String> {
    Path::new(path).file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Piece of a compiled template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// Compiled format template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn compile(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut cursor = 0;

        while let Some(open) = source[cursor..].find('{').map(|i| cursor + i) {
            let Some(close) = source[open + 1..].find('}').map(|i| open + 1 + i) else {
                break;
            };

            if close == open + 1 {
                // `{}` is not a placeholder
                cursor = open + 1;
                continue;
            }

            if open > literal_start {
                segments.push(Segment::Literal(source[literal_start..open].to_string()));
            }
            segments.push(Segment::Field(Placeholder::parse(&source[open + 1..close])));
            cursor = close + 1;
            literal_start = cursor;
        }

        if literal_start < source.len() {
            segments.push(Segment::Literal(source[literal_start..].to_string()));
        }

        Self { source: source.to_string(), segments }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholders in template order, duplicates included
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(placeholder) => Some(placeholder),
            Segment::Literal(_) => None,
        })
    }

    /// Whether any placeholder resolves `name`
    pub fn references(&self, name: &str) -> bool {
        self.placeholders().any(|p| p.name == name || p.key == name)
    }
}
