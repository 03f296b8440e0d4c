//! Line-by-line processing of a JSON log stream
//!
//! Every line goes through `parse → resolve → flatten(message) → filter → exclude →
//! render → emit`. Each line is handled independently:
//!
//! - **Malformed lines** (invalid JSON, or JSON that isn't an object) produce an
//!   `Invalid JSON: <line>` diagnostic on the output and the run continues.
//! - **Filtered lines** are dropped silently.
//! - **Blank lines** are skipped.
//!
//! Only I/O failures of the reader or writer end a run early. A closed output pipe
//! (`jclog app.log | head`) ends it quietly.

use std::collections::{HashMap, HashSet};
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::PipelineOptions;
use crate::filters::is_accepted;
use crate::models::{Record, ResolvedFields};
use crate::parsers::{
    AliasTable, LEVEL_FIELD, MESSAGE_FIELD, flatten_json_string, parse_record, resolve_field,
};
use crate::render::{Palette, Template, render};

/// Result of processing a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Line to emit for an accepted record
    Rendered(String),
    /// Diagnostic for a line that isn't a JSON object
    Invalid(String),
    /// Record rejected by the filters or excludes
    Filtered,
    /// Blank line
    Skipped,
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines: usize,
    pub rendered: usize,
    pub invalid: usize,
    pub filtered: usize,
}

/// Compiled, read-only processing pipeline
pub struct Pipeline {
    options: PipelineOptions,
    template: Template,
    aliases: AliasTable,
    /// Requested fields that aren't already placeholders
    extra_fields: Vec<String>,
    /// Whether any wanted key lives below `message.`
    needs_flatten: bool,
    palette: Box<dyn Palette>,
}

impl Pipeline {
    pub fn new(options: PipelineOptions, palette: Box<dyn Palette>) -> Self {
        let template = Template::compile(&options.effective_format());
        let extra_fields: Vec<String> = options
            .requested_fields()
            .into_iter()
            .filter(|field| !template.placeholders().any(|p| &p.key == field))
            .collect();

        let nested_prefix = format!("{}.", MESSAGE_FIELD);
        let needs_flatten = template
            .placeholders()
            .map(|p| p.name.as_str())
            .chain(extra_fields.iter().map(String::as_str))
            .any(|name| name.starts_with(&nested_prefix));

        Self {
            options,
            template,
            aliases: AliasTable::default(),
            extra_fields,
            needs_flatten,
            palette,
        }
    }

    /// Replace the alias table
    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Build the resolved field set for one record
    ///
    /// Placeholders are stored under their full key (`file|basename`) with the
    /// modifier applied; extra requested fields under their plain name. Flattened
    /// `message.*` paths only replace entries that were asked for.
    pub fn resolve(&self, record: &Record) -> ResolvedFields {
        let mut fields = ResolvedFields::new();

        for placeholder in self.template.placeholders() {
            let value = self.resolve_value(record, &placeholder.name);
            fields.insert(placeholder.key.clone(), placeholder.apply(value));
        }
        for field in &self.extra_fields {
            fields.insert(field.clone(), self.resolve_value(record, field));
        }

        if self.needs_flatten {
            let message = resolve_field(record, MESSAGE_FIELD, &self.aliases);
            if !message.is_empty() {
                let mut flattened = HashMap::new();
                flatten_json_string(
                    &message,
                    MESSAGE_FIELD,
                    &mut flattened,
                    self.options.max_depth,
                    1,
                );
                self.promote(&mut fields, &flattened);
            }
        }

        fields
    }

    fn resolve_value(&self, record: &Record, name: &str) -> String {
        let value = resolve_field(record, name, &self.aliases);
        if name == LEVEL_FIELD
            && self.options.auto_convert_level
            && let Some(mapped) = self.options.level_mappings.get(&value)
        {
            return mapped.clone();
        }
        value
    }

    /// Copy the requested subset of flattened keys into the field set
    fn promote(&self, fields: &mut ResolvedFields, flattened: &HashMap<String, String>) {
        for placeholder in self.template.placeholders() {
            if let Some(value) = flattened.get(&placeholder.name) {
                fields.insert(placeholder.key.clone(), placeholder.apply(value.clone()));
            }
        }
        for field in &self.extra_fields {
            if let Some(value) = flattened.get(field) {
                fields.insert(field.clone(), value.clone());
            }
        }
    }

    /// Process one input line
    pub fn process_line(&self, line: &str) -> LineOutcome {
        if line.trim().is_empty() {
            return LineOutcome::Skipped;
        }

        let record = match parse_record(line) {
            Ok(record) => record,
            Err(e) => {
                debug!("Rejected line: {}", e);
                return LineOutcome::Invalid(format!("Invalid JSON: {}", line));
            }
        };

        let fields = self.resolve(&record);
        if !is_accepted(&fields, &self.options.filters, &self.options.excludes) {
            return LineOutcome::Filtered;
        }

        LineOutcome::Rendered(render(
            &self.template,
            &fields,
            self.options.hide_missing,
            self.palette.as_ref(),
        ))
    }

    /// Process every line of `reader`, writing rendered lines and diagnostics to `writer`
    ///
    /// Input is decoded as lossy UTF-8 so a ragged or binary line never aborts the run.
    pub fn run<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            let read = reader.read_until(b'\n', &mut buffer).context("Failed to read input")?;
            if read == 0 {
                break;
            }
            stats.lines += 1;

            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim_end_matches(['\n', '\r']);

            let output = match self.process_line(line) {
                LineOutcome::Rendered(output) => {
                    stats.rendered += 1;
                    output
                }
                LineOutcome::Invalid(diagnostic) => {
                    debug!("Line {} is not a JSON object", stats.lines);
                    stats.invalid += 1;
                    diagnostic
                }
                LineOutcome::Filtered => {
                    stats.filtered += 1;
                    continue;
                }
                LineOutcome::Skipped => continue,
            };

            if let Err(e) = writeln!(writer, "{}", output) {
                if e.kind() == io::ErrorKind::BrokenPipe {
                    debug!("Output closed after {} lines", stats.lines);
                    return Ok(stats);
                }
                return Err(e).context("Failed to write output");
            }
        }

        if let Err(e) = writer.flush()
            && e.kind() != io::ErrorKind::BrokenPipe
        {
            return Err(e).context("Failed to write output");
        }

        debug!(
            "Processed {} lines: {} rendered, {} invalid, {} filtered",
            stats.lines, stats.rendered, stats.invalid, stats.filtered
        );
        Ok(stats)
    }
}

/// Field names shown or requested by `options`, used when reporting configuration
pub fn wanted_fields(options: &PipelineOptions) -> Vec<String> {
    let template = Template::compile(&options.effective_format());
    let mut seen = HashSet::new();
    template
        .placeholders()
        .map(|p| p.name.clone())
        .chain(options.requested_fields())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::parse_filter_args;
    use crate::render::PlainPalette;

    fn options(format: &str) -> PipelineOptions {
        PipelineOptions { format: format.to_string(), ..PipelineOptions::default() }
    }

    fn pipeline(options: PipelineOptions) -> Pipeline {
        Pipeline::new(options, Box::new(PlainPalette))
    }

    fn run_to_string(pipeline: &Pipeline, input: &str) -> (String, RunStats) {
        let mut output = Vec::new();
        let stats = pipeline.run(input.as_bytes(), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), stats)
    }

    #[test]
    fn test_basic_line() {
        let p = pipeline(options("{timestamp} [{level}] {message}"));
        assert_eq!(
            p.process_line(r#"{"timestamp": "2024-03-20", "level": "INFO", "message": "test"}"#),
            LineOutcome::Rendered("2024-03-20 [INFO] test".to_string())
        );
    }

    #[test]
    fn test_aliases_feed_canonical_placeholders() {
        let p = pipeline(options("{timestamp} [{level}] {message}"));
        assert_eq!(
            p.process_line(r#"{"ts": "10:00", "severity": "WARN", "msg": "slow"}"#),
            LineOutcome::Rendered("10:00 [WARN] slow".to_string())
        );
    }

    #[test]
    fn test_invalid_json_diagnostic() {
        let p = pipeline(options("{message}"));
        assert_eq!(
            p.process_line("invalid json"),
            LineOutcome::Invalid("Invalid JSON: invalid json".to_string())
        );
        assert_eq!(
            p.process_line("[1,2]"),
            LineOutcome::Invalid("Invalid JSON: [1,2]".to_string())
        );
    }

    #[test]
    fn test_blank_line_skipped() {
        let p = pipeline(options("{message}"));
        assert_eq!(p.process_line(""), LineOutcome::Skipped);
        assert_eq!(p.process_line("   "), LineOutcome::Skipped);
    }

    #[test]
    fn test_filter_and_exclude() {
        let mut opts = options("[{level}] {message}");
        opts.filters = parse_filter_args(&["env=prod"]);
        opts.excludes = parse_filter_args(&["level=DEBUG"]);
        let p = pipeline(opts);

        assert_eq!(
            p.process_line(r#"{"level":"INFO","message":"kept","env":"prod"}"#),
            LineOutcome::Rendered("[INFO] kept".to_string())
        );
        assert_eq!(
            p.process_line(r#"{"level":"DEBUG","message":"noise","env":"prod"}"#),
            LineOutcome::Filtered
        );
        assert_eq!(
            p.process_line(r#"{"level":"INFO","message":"other env","env":"dev"}"#),
            LineOutcome::Filtered
        );
        assert_eq!(p.process_line(r#"{"level":"INFO","message":"no env"}"#), LineOutcome::Filtered);
    }

    #[test]
    fn test_filter_on_flattened_field() {
        let mut opts = options("{message.user}");
        opts.filters = parse_filter_args(&["message.action=login"]);
        let p = pipeline(opts);

        let login = r#"{"message": "{\"user\":\"alice\",\"action\":\"login\"}"}"#;
        let logout = r#"{"message": "{\"user\":\"bob\",\"action\":\"logout\"}"}"#;
        assert_eq!(p.process_line(login), LineOutcome::Rendered("alice".to_string()));
        assert_eq!(p.process_line(logout), LineOutcome::Filtered);
    }

    #[test]
    fn test_nested_message_fields() {
        let p = pipeline(options("[{level}] {message.user.name} {message.status}"));
        let line = r#"{"level":"INFO","msg":"{\"user\":{\"name\":\"alice\"},\"status\":200}"}"#;
        assert_eq!(p.process_line(line), LineOutcome::Rendered("[INFO] alice 200".to_string()));
    }

    #[test]
    fn test_nested_beyond_max_depth_is_literal() {
        let mut opts = options("{message.user}");
        opts.max_depth = 1;
        let p = pipeline(opts);
        let line = r#"{"message":"{\"user\":{\"name\":\"alice\"}}"}"#;
        assert_eq!(
            p.process_line(line),
            LineOutcome::Rendered(r#"{"name":"alice"}"#.to_string())
        );
    }

    #[test]
    fn test_unrequested_flattened_keys_are_discarded() {
        let p = pipeline(options("{message.a}"));
        let record = parse_record(r#"{"message":"{\"a\":\"1\",\"b\":\"2\"}"}"#).unwrap();
        let fields = p.resolve(&record);
        assert_eq!(fields.get("message.a"), Some("1"));
        assert!(!fields.contains_key("message.b"));
    }

    #[test]
    fn test_message_placeholder_keeps_raw_json() {
        let p = pipeline(options("{message} {message.a}"));
        let line = r#"{"message":"{\"a\":\"x\"}"}"#;
        assert_eq!(p.process_line(line), LineOutcome::Rendered(r#"{"a":"x"} x"#.to_string()));
    }

    #[test]
    fn test_level_auto_conversion() {
        let mut opts = options("[{level}] {msg}");
        opts.auto_convert_level = true;
        let p = pipeline(opts);
        assert_eq!(
            p.process_line(r#"{"level":30,"msg":"pino style"}"#),
            LineOutcome::Rendered("[INFO] pino style".to_string())
        );
        assert_eq!(
            p.process_line(r#"{"level":35,"msg":"unmapped"}"#),
            LineOutcome::Rendered("[35] unmapped".to_string())
        );
    }

    #[test]
    fn test_level_numbers_kept_without_conversion() {
        let p = pipeline(options("[{level}] {msg}"));
        assert_eq!(
            p.process_line(r#"{"level":50,"msg":"boom"}"#),
            LineOutcome::Rendered("[50] boom".to_string())
        );
    }

    #[test]
    fn test_converted_level_is_filterable() {
        let mut opts = options("{msg}");
        opts.auto_convert_level = true;
        opts.filters = parse_filter_args(&["level=ERROR"]);
        let p = pipeline(opts);
        assert_eq!(
            p.process_line(r#"{"level":50,"msg":"boom"}"#),
            LineOutcome::Rendered("boom".to_string())
        );
        assert_eq!(p.process_line(r#"{"level":30,"msg":"fine"}"#), LineOutcome::Filtered);
    }

    #[test]
    fn test_basename_modifier() {
        let p = pipeline(options("{file|basename}:{line} {file}"));
        assert_eq!(
            p.process_line(r#"{"file":"/srv/app/handler.go","line":42}"#),
            LineOutcome::Rendered("handler.go:42 /srv/app/handler.go".to_string())
        );
    }

    #[test]
    fn test_hide_missing() {
        let mut opts = options("{time} [{level}] {msg} ({name})");
        opts.hide_missing = true;
        let p = pipeline(opts);
        assert_eq!(
            p.process_line(r#"{"time":"10:00","msg":"hello"}"#),
            LineOutcome::Rendered("10:00 hello".to_string())
        );
    }

    #[test]
    fn test_extra_fields_are_resolved() {
        let mut opts = options("{msg}");
        opts.fields = vec!["service".to_string()];
        let p = pipeline(opts);
        let record = parse_record(r#"{"msg":"hi","service":"api"}"#).unwrap();
        assert_eq!(p.resolve(&record).get("service"), Some("api"));
    }

    #[test]
    fn test_empty_format_shows_listed_fields() {
        let mut opts = options("");
        opts.fields = vec!["service".to_string(), "message.nested".to_string()];
        let p = pipeline(opts);
        let line = r#"{"service":"api","level":"INFO","message":"{\"nested\":\"value\"}"}"#;
        assert_eq!(p.process_line(line), LineOutcome::Rendered("api value".to_string()));
    }

    #[test]
    fn test_empty_format_without_fields_shows_defaults() {
        let p = pipeline(options(""));
        let line = r#"{"timestamp":"2024-03-20","level":"INFO","message":"test message"}"#;
        assert_eq!(
            p.process_line(line),
            LineOutcome::Rendered("2024-03-20 INFO test message".to_string())
        );
    }

    #[test]
    fn test_hide_missing_keeps_message_spacing() {
        let mut opts = options("{pid} {msg}");
        opts.hide_missing = true;
        let p = pipeline(opts);
        assert_eq!(
            p.process_line(r#"{"msg":"col1    col2"}"#),
            LineOutcome::Rendered("col1    col2".to_string())
        );
    }

    #[test]
    fn test_custom_alias_table() {
        let aliases = AliasTable::default().with_entry("host", &["host", "hostname"]);
        let p = pipeline(options("{host}")).with_aliases(aliases);
        assert_eq!(
            p.process_line(r#"{"hostname":"web-1"}"#),
            LineOutcome::Rendered("web-1".to_string())
        );
    }

    #[test]
    fn test_run_continues_past_bad_lines() {
        let p = pipeline(options("[{level}] {message}"));
        let input = concat!(
            "{\"level\":\"INFO\",\"message\":\"first\"}\n",
            "not json\n",
            "\n",
            "{\"level\":\"WARN\",\"message\":\"second\"}\r\n",
            "{\"level\":\"ERROR\",\"message\":\"no newline\"}",
        );
        let (output, stats) = run_to_string(&p, input);
        assert_eq!(
            output,
            "[INFO] first\nInvalid JSON: not json\n[WARN] second\n[ERROR] no newline\n"
        );
        assert_eq!(stats, RunStats { lines: 5, rendered: 3, invalid: 1, filtered: 0 });
    }

    #[test]
    fn test_run_counts_filtered() {
        let mut opts = options("{message}");
        opts.excludes = parse_filter_args(&["level=DEBUG"]);
        let p = pipeline(opts);
        let input = "{\"level\":\"DEBUG\",\"message\":\"a\"}\n{\"level\":\"INFO\",\"message\":\"b\"}\n";
        let (output, stats) = run_to_string(&p, input);
        assert_eq!(output, "b\n");
        assert_eq!(stats.filtered, 1);
    }

    #[test]
    fn test_run_tolerates_invalid_utf8() {
        let p = pipeline(options("{message}"));
        let mut input = b"{\"message\":\"ok\"}\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let mut output = Vec::new();
        let stats = p.run(input.as_slice(), &mut output).unwrap();
        assert_eq!(stats.rendered, 1);
        assert_eq!(stats.invalid, 1);
        assert!(String::from_utf8_lossy(&output).starts_with("ok\nInvalid JSON: "));
    }

    #[test]
    fn test_wanted_fields() {
        let mut opts = options("{time} {file|basename} {time}");
        opts.fields = vec!["service".to_string()];
        opts.filters = parse_filter_args(&["env=prod"]);
        assert_eq!(wanted_fields(&opts), vec!["time", "file", "service", "env"]);
    }
}
