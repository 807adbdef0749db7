use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_AUTH_BASE_URL, DEFAULT_FIRESTORE_BASE_URL,
    DEFAULT_TOKEN_BASE_URL,
};

use serde::Deserialize;

/// Connection parameters of the Firebase project backing the accounts.
///
/// `api_key` and `project_id` are required; the rest are carried for parity
/// with the web SDK settings and only logged. Base URLs are overridable so the
/// REST adapter can be pointed at an emulator or a mock server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub database_url: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
    pub measurement_id: Option<String>,
    pub auth_base_url: String,
    pub token_base_url: String,
    pub firestore_base_url: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            auth_domain: None,
            database_url: None,
            project_id: None,
            storage_bucket: None,
            messaging_sender_id: None,
            app_id: None,
            measurement_id: None,
            auth_base_url: String::from(DEFAULT_AUTH_BASE_URL),
            token_base_url: String::from(DEFAULT_TOKEN_BASE_URL),
            firestore_base_url: String::from(DEFAULT_FIRESTORE_BASE_URL),
        }
    }
}

impl FirebaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        Self::require("firebase.api_key", self.api_key.as_deref())?;
        Self::require("firebase.project_id", self.project_id.as_deref())?;

        for (name, url) in [
            ("firebase.auth_base_url", &self.auth_base_url),
            ("firebase.token_base_url", &self.token_base_url),
            ("firebase.firestore_base_url", &self.firestore_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::firebase(format!(
                    "{name} must start with http:// or https://, got '{url}'"
                )));
            }
        }

        Ok(())
    }

    /// API key with all but the last four characters masked, for logs.
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if key.chars().count() > 4 => {
                let tail: String = key.chars().skip(key.chars().count() - 4).collect();
                format!("****{tail}")
            }
            Some(_) => String::from("****"),
            None => String::from("<unset>"),
        }
    }

    fn require(name: &str, value: Option<&str>) -> ConfigErrorResult<()> {
        match value {
            Some(value) if !value.trim().is_empty() => Ok(()),
            _ => Err(ConfigError::firebase(format!("{name} is required"))),
        }
    }
}
