use std::collections::{HashMap, HashSet};

use super::profile::Profile;
use crate::filters::{FilterSet, parse_filter_args};

/// Fields shown when both the format and the fields list are empty
pub const DEFAULT_DISPLAY_FIELDS: &[&str] = &["timestamp", "level", "message"];

/// Fully resolved settings for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub format: String,
    /// Fields shown when `format` is empty; always resolved, even when not shown
    pub fields: Vec<String>,
    pub max_depth: usize,
    pub hide_missing: bool,
    pub filters: FilterSet,
    pub excludes: FilterSet,
    pub level_mappings: HashMap<String, String>,
    pub auto_convert_level: bool,
}

impl PipelineOptions {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            format: profile.format.clone(),
            fields: profile.fields.clone(),
            max_depth: profile.max_depth,
            hide_missing: profile.hide_missing,
            filters: parse_filter_args(&profile.filters),
            excludes: parse_filter_args(&profile.excludes),
            level_mappings: profile.level_mappings.clone(),
            auto_convert_level: profile.auto_convert_level,
        }
    }

    /// Format to render with
    ///
    /// An empty format shows the listed fields, or [`DEFAULT_DISPLAY_FIELDS`]
    /// when there are none, separated by spaces.
    pub fn effective_format(&self) -> String {
        if !self.format.is_empty() {
            return self.format.clone();
        }

        let fields: Vec<&str> = if self.fields.is_empty() {
            DEFAULT_DISPLAY_FIELDS.to_vec()
        } else {
            self.fields.iter().map(String::as_str).collect()
        };
        fields.iter().map(|field| format!("{{{}}}", field)).collect::<Vec<_>>().join(" ")
    }

    /// Explicitly requested field names plus every constrained field
    pub fn requested_fields(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.fields
            .iter()
            .map(String::as_str)
            .chain(self.filters.fields())
            .chain(self.excludes.fields())
            .filter(|field| seen.insert(*field))
            .map(str::to_string)
            .collect()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from_profile(&Profile::default())
    }
}
