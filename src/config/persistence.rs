//! Config persistence: load/save with atomic writes

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::profile::Config;

/// Load the configuration file at `path`
/// Returns the default configuration when the file doesn't exist
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: Config = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.ensure_default_profile();

    debug!("Loaded config from {} ({} profiles)", path.display(), config.profiles.len());
    Ok(config)
}

/// Save the configuration atomically (temp file + rename)
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    }

    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = Path::new(&temp);

    fs::write(temp, json).context("Failed to write config temp file")?;
    fs::rename(temp, path).context("Failed to rename config temp file")?;

    debug!("Saved config to {}", path.display());
    Ok(())
}
