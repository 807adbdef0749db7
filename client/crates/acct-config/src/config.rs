use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIRECTORY, FirebaseConfig, LoggingConfig, RateLimitConfig, SessionConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub firebase: FirebaseConfig,
    pub auth: AuthConfig,
    pub session: SessionConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for ACCT_CONFIG_DIR env var, else use ./.acct/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply ACCT_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: ACCT_CONFIG_DIR env var > ./.acct/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIRECTORY))
    }

    /// Validate all configuration.
    /// Missing Firebase connection parameters are fatal here, at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.firebase.validate()?;
        self.session.validate()?;
        self.rate_limit.validate()?;

        if let Some(file) = &self.logging.file
            && (file.trim().is_empty() || file.contains(".."))
        {
            return Err(ConfigError::logging(
                "logging.file must be a plain file name",
            ));
        }

        Ok(())
    }

    /// Absolute path of the persisted session, or None when persistence is off.
    pub fn session_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        if !self.session.persist {
            return Ok(None);
        }
        Ok(Some(Self::config_dir()?.join(&self.session.file)))
    }

    /// Absolute path of the log file, or None to log to stderr.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(file),
            )),
            None => Ok(None),
        }
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  firebase: project={}, api_key={}, auth_domain={}",
            self.firebase.project_id.as_deref().unwrap_or("<unset>"),
            self.firebase.masked_api_key(),
            self.firebase.auth_domain.as_deref().unwrap_or("<unset>")
        );
        info!(
            "  endpoints: auth={}, token={}, firestore={}",
            self.firebase.auth_base_url,
            self.firebase.token_base_url,
            self.firebase.firestore_base_url
        );
        info!(
            "  auth: reveal_unknown_accounts={}",
            self.auth.reveal_unknown_accounts
        );
        info!(
            "  session: {} ({})",
            if self.session.persist {
                "persisted"
            } else {
                "in-memory"
            },
            self.session.file
        );
        info!(
            "  rate_limit: {}/{}s",
            self.rate_limit.max_requests, self.rate_limit.window_secs
        );
        info!(
            "  logging: {} (colored: {})",
            self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Firebase
        Self::apply_env_option_string("ACCT_FIREBASE_API_KEY", &mut self.firebase.api_key);
        Self::apply_env_option_string(
            "ACCT_FIREBASE_AUTH_DOMAIN",
            &mut self.firebase.auth_domain,
        );
        Self::apply_env_option_string(
            "ACCT_FIREBASE_DATABASE_URL",
            &mut self.firebase.database_url,
        );
        Self::apply_env_option_string("ACCT_FIREBASE_PROJECT_ID", &mut self.firebase.project_id);
        Self::apply_env_option_string(
            "ACCT_FIREBASE_STORAGE_BUCKET",
            &mut self.firebase.storage_bucket,
        );
        Self::apply_env_option_string(
            "ACCT_FIREBASE_MESSAGE_SENDER_ID",
            &mut self.firebase.messaging_sender_id,
        );
        Self::apply_env_option_string("ACCT_FIREBASE_APP_ID", &mut self.firebase.app_id);
        Self::apply_env_option_string(
            "ACCT_FIREBASE_MEASUREMENT_ID",
            &mut self.firebase.measurement_id,
        );
        Self::apply_env_string(
            "ACCT_FIREBASE_AUTH_BASE_URL",
            &mut self.firebase.auth_base_url,
        );
        Self::apply_env_string(
            "ACCT_FIREBASE_TOKEN_BASE_URL",
            &mut self.firebase.token_base_url,
        );
        Self::apply_env_string(
            "ACCT_FIREBASE_FIRESTORE_BASE_URL",
            &mut self.firebase.firestore_base_url,
        );

        // Auth
        Self::apply_env_bool(
            "ACCT_AUTH_REVEAL_UNKNOWN_ACCOUNTS",
            &mut self.auth.reveal_unknown_accounts,
        );

        // Session
        Self::apply_env_bool("ACCT_SESSION_PERSIST", &mut self.session.persist);
        Self::apply_env_string("ACCT_SESSION_FILE", &mut self.session.file);

        // Rate limit
        Self::apply_env_parse(
            "ACCT_RATE_LIMIT_MAX_REQUESTS",
            &mut self.rate_limit.max_requests,
        );
        Self::apply_env_parse(
            "ACCT_RATE_LIMIT_WINDOW_SECS",
            &mut self.rate_limit.window_secs,
        );

        // Logging
        Self::apply_env_parse("ACCT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("ACCT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_string("ACCT_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_option_string("ACCT_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
