use crate::{ConfigError, ConfigErrorResult, DEFAULT_SESSION_FILENAME, DEFAULT_SESSION_PERSIST};

use std::path::Path;

use serde::Deserialize;

/// Where the signed-in session survives between process runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub persist: bool,
    /// Session file, relative to the config directory
    pub file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist: DEFAULT_SESSION_PERSIST,
            file: String::from(DEFAULT_SESSION_FILENAME),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.file.trim().is_empty() {
            return Err(ConfigError::session("session.file cannot be empty"));
        }

        if Path::new(&self.file).is_absolute() || self.file.contains("..") {
            return Err(ConfigError::session(
                "session.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
