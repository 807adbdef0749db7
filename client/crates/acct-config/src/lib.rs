mod auth_config;
mod config;
mod error;
mod firebase_config;
mod log_level;
mod logging_config;
mod rate_limit_config;
mod session_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use firebase_config::FirebaseConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_limit_config::{
    DEFAULT_RATE_LIMIT_REQUESTS, DEFAULT_RATE_LIMIT_WINDOW_SECS, MAX_RATE_LIMIT_REQUESTS,
    MAX_RATE_LIMIT_WINDOW_SECS, MIN_RATE_LIMIT_REQUESTS, MIN_RATE_LIMIT_WINDOW_SECS,
    RateLimitConfig,
};
pub use session_config::SessionConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "ACCT_CONFIG_DIR";
const DEFAULT_CONFIG_DIRECTORY: &str = ".acct";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_TOKEN_BASE_URL: &str = "https://securetoken.googleapis.com";
const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

const DEFAULT_REVEAL_UNKNOWN_ACCOUNTS: bool = false;
const DEFAULT_SESSION_PERSIST: bool = true;
const DEFAULT_SESSION_FILENAME: &str = "session.json";

const DEFAULT_LOG_LEVEL_STRING: &str = "warn";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Warn;
const DEFAULT_LOG_COLORED: bool = true;
const DEFAULT_LOG_DIRECTORY: &str = "log";
