mod error;
mod load;
mod paths;
mod resolve;
mod types;

const DEFAULT_API_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

pub use load::load_config;
pub use paths::ConfigPaths;
pub use resolve::{resolve_settings, API_KEY_ENV};
pub use types::LoggingConfig;
