use std::path::PathBuf;

/// File name of the configuration stored in the home directory
pub const CONFIG_FILE_NAME: &str = ".jclog.json";

/// Environment variable holding the tracing filter, e.g. `JCLOG_LOG=debug`
pub const LOG_ENV_VAR: &str = "JCLOG_LOG";

/// Default config path (~/.jclog.json)
/// Falls back to the working directory when no home directory is known
pub fn default_config_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_default_config_path_uses_home() {
        // Save original HOME value
        let original_home = env::var("HOME").ok();

        // SAFETY: Setting environment variables in tests is safe as long as:
        // 1. No other test in this crate reads HOME concurrently
        // 2. We restore the original value afterwards
        unsafe {
            env::set_var("HOME", "/Users/testuser");
        }

        let path = default_config_path();
        assert_eq!(path, PathBuf::from("/Users/testuser/.jclog.json"));

        // Restore original HOME
        if let Some(home) = original_home {
            unsafe {
                env::set_var("HOME", home);
            }
        }
    }
}
