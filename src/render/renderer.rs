use std::borrow::Cow;

use super::colors::Palette;
use super::template::{Segment, Template};
use crate::models::ResolvedFields;
use crate::parsers::LEVEL_FIELD;

/// Prefix of the marker shown for a missing, unbracketed field
pub const MISSING_MARKER: &str = "❓";

const BRACKET_PAIRS: [(char, char); 2] = [('[', ']'), ('(', ')')];

/// Rendered piece of a line, kept apart so removals can be cleaned up
/// without touching substituted values
enum Piece<'a> {
    Literal(&'a str),
    Value(Cow<'a, str>),
    Removed,
}

/// Render one line from a compiled template and the resolved fields
///
/// Present, non-empty values are substituted as-is; modifiers were applied when the
/// fields were resolved. A missing value follows the missing-field policy:
///
/// | occurrence      | `hide_missing = false`  | `hide_missing = true` |
/// |-----------------|-------------------------|-----------------------|
/// | `[{x}]`, `({x})`| group removed           | group removed         |
/// | `{x}`           | `❓x` marker            | removed               |
///
/// In hide mode the template spaces around each removal shrink to one and the
/// line is trimmed. Finally the whole line is colored by the uppercased `level`, if any.
pub fn render(
    template: &Template,
    fields: &ResolvedFields,
    hide_missing: bool,
    palette: &dyn Palette,
) -> String {
    let pieces = layout(template, fields, hide_missing, palette);

    let output = if hide_missing && pieces.iter().any(|p| matches!(p, Piece::Removed)) {
        join_closing_gaps(&pieces)
    } else {
        join(&pieces)
    };

    match fields.non_empty(LEVEL_FIELD) {
        Some(level) => palette.paint_level(&output, &level.to_uppercase()),
        None => output,
    }
}

/// Substitute every segment, deciding per placeholder whether it is kept,
/// marked or removed with its enclosing brackets
fn layout<'a>(
    template: &'a Template,
    fields: &'a ResolvedFields,
    hide_missing: bool,
    palette: &dyn Palette,
) -> Vec<Piece<'a>> {
    let segments = template.segments();
    let mut pieces = Vec::with_capacity(segments.len());
    let mut skip_closer = false;

    for (index, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Literal(text) => {
                let text =
                    if std::mem::take(&mut skip_closer) { &text[1..] } else { text.as_str() };
                pieces.push(Piece::Literal(text));
            }
            Segment::Field(placeholder) => {
                if let Some(value) = fields.non_empty(&placeholder.key) {
                    pieces.push(Piece::Value(Cow::Borrowed(value)));
                } else if let Some(Piece::Literal(before)) = pieces.last_mut()
                    && let Some(stripped) = strip_opener(*before, segments.get(index + 1))
                {
                    // Opener leaves the previous literal, the closer the next one
                    *before = stripped;
                    skip_closer = true;
                    pieces.push(Piece::Removed);
                } else if hide_missing {
                    pieces.push(Piece::Removed);
                } else {
                    let marker = format!("{}{}", MISSING_MARKER, placeholder.name);
                    pieces.push(Piece::Value(Cow::Owned(palette.paint_missing(&marker))));
                }
            }
        }
    }

    pieces
}

/// `literal` without its final opener when the next literal starts with the
/// matching closer; `None` when the placeholder isn't directly enclosed
fn strip_opener<'a>(literal: &'a str, next: Option<&Segment>) -> Option<&'a str> {
    let Some(Segment::Literal(next)) = next else {
        return None;
    };

    BRACKET_PAIRS
        .iter()
        .filter(|&&(_, close)| next.starts_with(close))
        .find_map(|&(open, _)| literal.strip_suffix(open))
}

fn join(pieces: &[Piece]) -> String {
    let mut output = String::new();
    for piece in pieces {
        match piece {
            Piece::Literal(text) => output.push_str(text),
            Piece::Value(value) => output.push_str(value),
            Piece::Removed => {}
        }
    }
    output
}

/// Join pieces so that the template spaces on both sides of a removal become a
/// single space, then trim the line. Substituted values are copied unchanged.
fn join_closing_gaps(pieces: &[Piece]) -> String {
    let mut output = String::new();
    // Trailing spaces of `output` that came from template literals
    let mut literal_spaces = 0;
    let mut gap = false;

    for piece in pieces {
        match piece {
            Piece::Removed => gap = true,
            Piece::Value(value) => {
                output.push_str(value);
                literal_spaces = 0;
                gap = false;
            }
            Piece::Literal(text) => {
                let mut text = *text;
                if std::mem::take(&mut gap) {
                    let leading = text.len() - text.trim_start_matches(' ').len();
                    if literal_spaces + leading > 0 {
                        output.truncate(output.len() - literal_spaces);
                        output.push(' ');
                        literal_spaces = 1;
                    }
                    text = &text[leading..];
                }

                output.push_str(text);
                let body = text.trim_end_matches(' ');
                if body.is_empty() {
                    literal_spaces += text.len();
                } else {
                    literal_spaces = text.len() - body.len();
                }
            }
        }
    }

    if gap {
        output.truncate(output.len() - literal_spaces);
    }
    output.trim().to_string()
}
