use std::borrow::Cow;
use std::env;
use std::path::Path;

/// Formats a path for display, replacing the home directory prefix with `~`
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use jclog::utils::format_path_with_tilde;
///
/// let path = PathBuf::from("/opt/logs/app.log");
/// assert_eq!(format_path_with_tilde(&path), "/opt/logs/app.log");
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref()).filter(|h| !h.is_empty() && *h != "/");

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && let Some(rest) = path_str.strip_prefix(home)
        && (rest.is_empty() || rest.starts_with('/'))
    {
        return format!("~{}", rest);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
