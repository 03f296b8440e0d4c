use std::collections::{BTreeMap, HashMap};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Name of the profile that always exists and cannot be removed
pub const DEFAULT_PROFILE: &str = "default";

/// Format used when neither the CLI nor a profile provides one
pub const DEFAULT_FORMAT: &str = "{time} [{level}] {msg} ({name})";

pub const DEFAULT_MAX_DEPTH: usize = 2;

/// chrono format for `time`/`timestamp` examples shown by `inspect`
pub const DEFAULT_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.3f";

/// Persisted configuration: named profiles plus the one in use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub active_profile: String,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

/// One set of rendering options
///
/// Fields absent from the config file take their values from [`Profile::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub format: String,
    pub fields: Vec<String>,
    pub max_depth: usize,
    pub hide_missing: bool,
    pub filters: Vec<String>,
    pub excludes: Vec<String>,
    pub level_mappings: HashMap<String, String>,
    pub auto_convert_level: bool,
    pub time_format: String,
}

impl Default for Profile {
    fn default() -> Self {
        let level_mappings = [
            ("10", "TRACE"),
            ("20", "DEBUG"),
            ("30", "INFO"),
            ("40", "WARN"),
            ("50", "ERROR"),
            ("60", "FATAL"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            format: DEFAULT_FORMAT.to_string(),
            fields: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            hide_missing: false,
            filters: Vec::new(),
            excludes: Vec::new(),
            level_mappings,
            auto_convert_level: false,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), Profile::default());
        Self { active_profile: DEFAULT_PROFILE.to_string(), profiles }
    }
}

impl Config {
    /// Insert the default profile when a loaded file lacks one
    pub fn ensure_default_profile(&mut self) {
        self.profiles.entry(DEFAULT_PROFILE.to_string()).or_default();
    }

    /// Active profile, falling back to `default` when the active name is unknown
    pub fn active_profile(&self) -> Profile {
        self.profile_or_default(&self.active_profile)
    }

    /// Named profile, falling back to `default` when the name is unknown
    pub fn profile_or_default(&self, name: &str) -> Profile {
        self.profiles
            .get(name)
            .or_else(|| self.profiles.get(DEFAULT_PROFILE))
            .cloned()
            .unwrap_or_default()
    }

    /// Add a profile, replacing any existing one with the same name
    pub fn add_profile(&mut self, name: &str, profile: Profile) {
        self.profiles.insert(name.to_string(), profile);
    }

    pub fn remove_profile(&mut self, name: &str) -> Result<()> {
        if name == DEFAULT_PROFILE {
            bail!("cannot remove {} profile", DEFAULT_PROFILE);
        }
        if self.profiles.remove(name).is_none() {
            bail!("profile '{}' does not exist", name);
        }
        if self.active_profile == name {
            self.active_profile = DEFAULT_PROFILE.to_string();
        }
        Ok(())
    }

    pub fn set_active(&mut self, name: &str) -> Result<()> {
        if !self.profiles.contains_key(name) {
            bail!("profile '{}' does not exist", name);
        }
        self.active_profile = name.to_string();
        Ok(())
    }
}
