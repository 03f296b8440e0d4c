pub mod environment;
pub mod logging;
pub mod paths;

pub use environment::{CONFIG_FILE_NAME, LOG_ENV_VAR, default_config_path};
pub use logging::init_logging;
pub use paths::format_path_with_tilde;
