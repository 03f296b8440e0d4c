//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Builder for a temporary directory holding log files and a config file
pub struct LogDirBuilder {
    temp_dir: TempDir,
}

impl LogDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Config file location inside the directory; the file may not exist
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("jclog.json")
    }

    pub fn log_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write a log file with raw content
    pub fn with_log(self, name: &str, content: &str) -> Self {
        fs::write(self.log_path(name), content).expect("Failed to write log file");
        self
    }

    /// Write a log file with one record per line
    pub fn with_records(self, name: &str, records: &[RecordBuilder]) -> Self {
        let content = records.iter().map(|r| r.to_json()).collect::<Vec<_>>().join("\n");
        self.with_log(name, &content)
    }

    pub fn with_config(self, content: &str) -> Self {
        fs::write(self.config_path(), content).expect("Failed to write config file");
        self
    }
}

/// Builder for a single JSON log record; keys keep insertion order
#[derive(Default, Clone)]
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn time(self, time: &str) -> Self {
        self.field("time", json!(time))
    }

    pub fn level(self, level: &str) -> Self {
        self.field("level", json!(level))
    }

    pub fn msg(self, msg: &str) -> Self {
        self.field("msg", json!(msg))
    }

    /// `message` holding an embedded JSON document as a string
    pub fn message_json(self, payload: Value) -> Self {
        self.field("message", json!(payload.to_string()))
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

/// A typical service record: time, level, msg, service
pub fn service_record(level: &str, msg: &str, service: &str) -> RecordBuilder {
    RecordBuilder::new()
        .time("10:00:00")
        .level(level)
        .msg(msg)
        .field("service", json!(service))
}
