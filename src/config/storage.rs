//! Snapshot storage configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;

/// Where the latest context snapshot is persisted
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the snapshot file
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Snapshot file name inside `directory`
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl StorageConfig {
    /// Full path of the snapshot file
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.directory"));
        }
        if self.file_name.is_empty() {
            return Err(ValidationError::MissingRequired("storage.file_name"));
        }
        if self.file_name.contains('/') || self.file_name.contains('\\') {
            return Err(ValidationError::InvalidFileName(self.file_name.clone()));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_name: default_file_name(),
        }
    }
}

fn default_directory() -> PathBuf {
    Path::new("./data/crash-context").to_path_buf()
}

fn default_file_name() -> String {
    "last-context.json".to_string()
}
