use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors of adapter setup and session file handling.
///
/// Backend call failures are reported as [`acct_core::AuthError`] instead.
#[derive(Error, Debug)]
pub enum FirebaseError {
    #[error("Missing Firebase setting '{name}' {location}")]
    MissingSetting {
        name: &'static str,
        location: ErrorLocation,
    },

    #[error("Failed to create HTTP client: {source} {location}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Failed to create directory at {path}: {source} {location}")]
    DirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to read session file at {path}: {source} {location}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to write session file at {path}: {source} {location}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to remove session file at {path}: {source} {location}")]
    FileRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to serialize session: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Atomic rename failed from {from} to {to}: {source} {location}")]
    AtomicRename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to backup corrupted session file: {source} {location}")]
    BackupFailed {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl FirebaseError {
    #[track_caller]
    pub fn missing_setting(name: &'static str) -> Self {
        Self::MissingSetting {
            name,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn http_client(source: reqwest::Error) -> Self {
        Self::HttpClient {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn dir_creation(path: PathBuf, source: std::io::Error) -> Self {
        Self::DirCreation {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn file_read(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileRead {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn file_write(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileWrite {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn file_remove(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileRemove {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn atomic_rename(from: PathBuf, to: PathBuf, source: std::io::Error) -> Self {
        Self::AtomicRename {
            from,
            to,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether this error is recoverable via retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. }
                | Self::FileWrite { .. }
                | Self::FileRemove { .. }
                | Self::AtomicRename { .. }
        )
    }

    /// User-friendly recovery hint.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::MissingSetting { .. } => {
                "Set the Firebase API key and project id in config.toml \
                   or the ACCT_FIREBASE_* environment variables."
            }
            Self::HttpClient { .. } => {
                "Unable to initialize TLS. Check the system certificate store."
            }
            Self::DirCreation { .. } | Self::FileWrite { .. } | Self::AtomicRename { .. } => {
                "Unable to save the session. \
                   Check disk space and permissions of the config directory."
            }
            Self::FileRead { .. } | Self::FileRemove { .. } => {
                "Unable to access the session file. \
                   It may be locked by another process."
            }
            Self::Serialization { .. } => {
                "Internal error preparing session data. Please report this issue."
            }
            Self::BackupFailed { .. } => {
                "Unable to backup the corrupted session file. \
                   Check file permissions in the config directory."
            }
        }
    }
}

impl From<serde_json::Error> for FirebaseError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, FirebaseError>;
