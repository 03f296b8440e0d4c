//! Field discovery for a log file
//!
//! Looks at the first record of a file and reports each field in source order,
//! then proposes format strings built from what it found.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::DateTime;
use crossterm::style::{Color, Stylize};
use serde_json::Value;

use crate::parsers::{AliasTable, json_type_name, parse_record};

/// Recommended order for common log fields
pub const DEFAULT_FIELD_ORDER: &[&str] = &[
    "time",
    "level",
    "http_code",
    "http_method",
    "uri",
    "route",
    "pid",
    "target",
    "file",
    "line",
    "message",
    "error",
];

/// Fields most people want to see
pub const SUGGESTED_FIELDS: &[&str] =
    &["time", "level", "http_code", "http_method", "uri", "file", "line", "message", "error"];

/// Fields rendered inside brackets in suggested formats
const BRACKETED_FIELDS: &[&str] = &["level", "http_code"];

/// One field of the inspected record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub type_name: &'static str,
    pub example: String,
    pub aliases: Vec<String>,
}

/// Options controlling how examples and formats are presented
#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// Reduce `file` examples to their basename and suggest `{file|basename}`
    pub basename: bool,
    /// chrono format applied to RFC 3339 `time`/`timestamp` examples
    pub time_format: String,
    pub colored: bool,
}

/// Describe every field of a single record line, in source order
pub fn analyze_line(
    line: &str,
    aliases: &AliasTable,
    options: &InspectOptions,
) -> Result<Vec<FieldInfo>> {
    let record = parse_record(line).context("invalid JSON")?;

    Ok(record
        .iter()
        .map(|(name, value)| FieldInfo {
            name: name.clone(),
            type_name: json_type_name(value),
            example: example_for(name, value, options),
            aliases: aliases.related(name).into_iter().map(str::to_string).collect(),
        })
        .collect())
}

fn example_for(name: &str, value: &Value, options: &InspectOptions) -> String {
    let example = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if options.basename && name == "file" {
        return Path::new(&example)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(example);
    }

    if name == "time" || name == "timestamp" {
        return reformat_time(&example, &options.time_format).unwrap_or(example);
    }

    example
}

/// Re-render an RFC 3339 timestamp; `None` when it doesn't parse or the format is invalid
fn reformat_time(value: &str, time_format: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(value).ok()?;
    let mut formatted = String::new();
    write!(formatted, "{}", parsed.format(time_format)).ok()?;
    Some(formatted)
}

/// Build a format string from the fields present, following `order`
pub fn build_format(fields: &[FieldInfo], order: &[&str], basename: bool) -> String {
    order
        .iter()
        .filter(|name| fields.iter().any(|f| f.name == **name))
        .map(|name| {
            if BRACKETED_FIELDS.contains(name) {
                format!("[{{{}}}]", name)
            } else if basename && *name == "file" {
                "{file|basename}".to_string()
            } else {
                format!("{{{}}}", name)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The three suggested formats: source order, recommended order, common subset
pub fn suggested_formats(fields: &[FieldInfo], basename: bool) -> [(&'static str, String); 3] {
    let source_order: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    [
        ("📝 All Fields Format (Original Order)", build_format(fields, &source_order, basename)),
        ("⭐ Recommended Format (Default Order)", build_format(fields, DEFAULT_FIELD_ORDER, basename)),
        ("💡 Suggested Format (Common Fields)", build_format(fields, SUGGESTED_FIELDS, basename)),
    ]
}

fn paint(text: &str, color: Color, colored: bool) -> String {
    if colored { text.with(color).to_string() } else { text.to_string() }
}

/// Write the field tree and format suggestions
pub fn write_report<W: Write>(
    writer: &mut W,
    fields: &[FieldInfo],
    options: &InspectOptions,
) -> std::io::Result<()> {
    writeln!(writer, "📋 Available Fields:")?;
    for (i, field) in fields.iter().enumerate() {
        let last = i + 1 == fields.len();
        let (branch, stem) = if last { ("└──", "    └──") } else { ("├──", "│   └──") };

        let alias_note = if field.aliases.is_empty() {
            String::new()
        } else {
            format!(" (alias: {})", field.aliases.join(", "))
        };

        writeln!(writer, "{} {}{}", branch, paint(&field.name, Color::Blue, options.colored), alias_note)?;
        writeln!(writer, "{} Type: {}", stem, field.type_name)?;
        let example = format!("{:?}", field.example);
        writeln!(writer, "{} Example: {}", stem, paint(&example, Color::Yellow, options.colored))?;
    }

    writeln!(writer)?;
    writeln!(writer, "🎨 Format Suggestions:")?;
    for (i, (title, format)) in suggested_formats(fields, options.basename).iter().enumerate() {
        writeln!(writer)?;
        writeln!(writer, "{}. {}:", i + 1, title)?;
        writeln!(writer, "   {}", paint(format, Color::Green, options.colored))?;
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "💪 Tip: Customize your format by removing or reordering fields from Format 1 above."
    )?;
    Ok(())
}

/// Inspect the first non-empty line of `path` and write the report
pub fn inspect_file<W: Write>(
    path: &Path,
    aliases: &AliasTable,
    options: &InspectOptions,
    writer: &mut W,
) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mut first_line = None;
    for line in BufReader::new(file).lines() {
        let line = line.context("Failed to read line from log file")?;
        if !line.trim().is_empty() {
            first_line = Some(line);
            break;
        }
    }
    let Some(line) = first_line else {
        bail!("empty log file: {}", path.display());
    };

    let fields = analyze_line(&line, aliases, options)?;
    write_report(writer, &fields, options).context("Failed to write report")?;
    Ok(())
}
