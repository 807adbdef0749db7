use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures of CLI startup and output, before or after an account operation.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] acct_config::ConfigError),

    #[error("Firebase setup error: {0}")]
    Firebase(#[from] acct_firebase::FirebaseError),

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to serialize output: {source} {location}")]
    Output {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl CliError {
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Output {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
