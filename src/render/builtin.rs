/// Named formats shipped with the binary, selectable with `--template`
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("default", "{time} [{level}] {msg} ({name})"),
    ("simple", "{timestamp} [{level}] {message}"),
    ("detailed", "{timestamp} [{level}] {message} ({file|basename}:{line})"),
    ("http", "{time} [{level}] [{http_code}] {http_method} {uri} {message}"),
    ("pino", "{time} [{level}] {msg} ({hostname}) pid={pid}"),
];

/// Look up a built-in template by name
pub fn find_template(name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES.iter().find(|(n, _)| *n == name).map(|(_, format)| *format)
}
