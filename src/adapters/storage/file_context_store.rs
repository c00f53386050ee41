//! File-based Context Store Adapter
//!
//! Stores the latest snapshot as a single JSON file. Writes go to a sibling
//! temporary file which is then renamed over the target, so a crash during
//! the write leaves the previous snapshot intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::ports::{ContextStore, StoreError};

/// File-based storage for the context snapshot
#[derive(Debug, Clone)]
pub struct FileContextStore {
    directory: PathBuf,
    file_name: String,
}

impl FileContextStore {
    /// Create a new file store
    ///
    /// # Arguments
    /// * `directory` - Directory holding the snapshot file
    /// * `file_name` - Name of the snapshot file inside `directory`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileContextStore::new("./data/crash-context", "last-context.json");
    /// ```
    pub fn new<P: AsRef<Path>>(directory: P, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            file_name: file_name.into(),
        }
    }

    /// Get the snapshot file path
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Get the temporary file path used while writing
    fn temp_path(&self) -> PathBuf {
        self.directory.join(format!("{}.tmp", self.file_name))
    }

    /// Get the path a snapshot is moved to while it is being taken
    fn taken_path(&self) -> PathBuf {
        self.directory.join(format!("{}.taken", self.file_name))
    }

    fn write_temp(&self, bytes: &[u8]) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        Ok(temp_path)
    }
}

fn io_error(e: std::io::Error) -> StoreError {
    StoreError::IoError(e.to_string())
}

impl ContextStore for FileContextStore {
    fn store(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let temp_path = self.write_temp(bytes).map_err(io_error)?;

        // Atomic replace
        fs::rename(&temp_path, self.file_path()).map_err(io_error)?;

        debug!(
            path = %self.file_path().display(),
            bytes = bytes.len(),
            "Stored context snapshot"
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.file_path()) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e)),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.file_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }

    fn take(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let taken_path = self.taken_path();

        // Move aside first so a concurrent store() lands in a fresh file
        match fs::rename(self.file_path(), &taken_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(e)),
        }

        match fs::read(&taken_path) {
            Ok(bytes) => {
                if let Err(e) = fs::remove_file(&taken_path) {
                    warn!(
                        path = %taken_path.display(),
                        error = %e,
                        "Failed to remove taken snapshot"
                    );
                }
                debug!(bytes = bytes.len(), "Took context snapshot");
                Ok(Some(bytes))
            }
            Err(e) => {
                // Put it back unless a newer snapshot arrived
                if !self.file_path().exists() {
                    if let Err(e) = fs::rename(&taken_path, self.file_path()) {
                        warn!(error = %e, "Failed to restore unreadable snapshot");
                    }
                }
                Err(io_error(e))
            }
        }
    }
}
