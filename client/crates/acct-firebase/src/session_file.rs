use crate::error::{FirebaseError, Result as FirebaseResult};
use crate::PersistedSession;

use std::fs;
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};

use error_location::ErrorLocation;
use log::{debug, info, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Result of loading the session file - distinguishes "not found" from corruption.
#[derive(Debug)]
pub struct SessionLoadResult {
    pub session: Option<PersistedSession>,
    /// Present if the file exists but could not be parsed
    pub corruption_error: Option<String>,
}

/// On-disk home of the persisted session.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted session.
    ///
    /// Returns:
    /// - `Ok(SessionLoadResult { session: Some(...), corruption_error: None })` - loaded
    /// - `Ok(SessionLoadResult { session: None, corruption_error: None })` - no file (signed out)
    /// - `Ok(SessionLoadResult { session: None, corruption_error: Some(...) })` - corrupted
    pub fn load(&self) -> FirebaseResult<SessionLoadResult> {
        if !self.path.exists() {
            debug!("No session file at {:?}", self.path);
            return Ok(SessionLoadResult {
                session: None,
                corruption_error: None,
            });
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| FirebaseError::file_read(self.path.clone(), e))?;

        match serde_json::from_str::<PersistedSession>(&contents) {
            Ok(session) => {
                info!(
                    "Loaded session for {} (schema v{})",
                    session.uid, session.schema_version
                );
                Ok(SessionLoadResult {
                    session: Some(session),
                    corruption_error: None,
                })
            }
            Err(e) => {
                warn!("Session file corrupted at {:?}: {e}", self.path);
                Ok(SessionLoadResult {
                    session: None,
                    corruption_error: Some(e.to_string()),
                })
            }
        }
    }

    /// Saves the session using write-to-temp, fsync, then atomic rename,
    /// so a crash mid-write never leaves a truncated file behind.
    pub fn save(&self, session: &PersistedSession) -> FirebaseResult<()> {
        let directory = self.directory();
        fs::create_dir_all(&directory)
            .map_err(|e| FirebaseError::dir_creation(directory.clone(), e))?;

        let temp_path = directory.join(format!("{}.tmp.{}", self.file_name(), std::process::id()));

        let json = serde_json::to_string_pretty(session)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| FirebaseError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| FirebaseError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| FirebaseError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            FirebaseError::atomic_rename(temp_path, self.path.clone(), e)
        })?;

        debug!("Saved session for {}", session.uid);
        Ok(())
    }

    /// Deletes the session file. A missing file is not an error.
    pub fn remove(&self) -> FirebaseResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed session file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FirebaseError::file_remove(self.path.clone(), e)),
        }
    }

    /// Renames the file to `{name}.corrupted.{timestamp}` for debugging.
    pub fn backup_corrupted(&self) -> FirebaseResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = self
            .directory()
            .join(format!("{}.corrupted.{timestamp}", self.file_name()));

        fs::rename(&self.path, &backup_path).map_err(|e| FirebaseError::BackupFailed {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        warn!("Backed up corrupted session to {backup_path:?}");
        Ok(Some(backup_path))
    }

    fn directory(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("session.json"))
    }
}
