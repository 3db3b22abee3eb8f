//! Workbench persistence.
//!
//! The whole workbench is one JSON blob, by default in the platform config
//! directory:
//! - Linux: ~/.config/khabari/khabari-storage.json
//! - macOS: ~/Library/Application Support/khabari/khabari-storage.json
//! - Windows: %APPDATA%/khabari/khabari-storage.json

use std::path::{Path, PathBuf};

use khabari_application::ports::{StateSink, StorageError};
use khabari_domain::Workbench;
use tokio::fs;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// File name of the persisted workbench.
pub const STORAGE_FILE: &str = "khabari-storage.json";

/// Stores the workbench in a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStateRepository {
    path: Option<PathBuf>,
}

impl FileStateRepository {
    /// Creates a repository in the platform config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|p| p.join(crate::settings::APP_DIR).join(STORAGE_FILE)),
        }
    }

    /// Creates a repository storing `khabari-storage.json` inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: Some(dir.as_ref().join(STORAGE_FILE)),
        }
    }

    /// Returns the path where the workbench is stored, if available.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Default for FileStateRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl StateSink for FileStateRepository {
    async fn load(&self) -> Result<Option<Workbench>, StorageError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        if !fs::try_exists(path).await? {
            debug!(path = %path.display(), "no stored workbench");
            return Ok(None);
        }

        let content = fs::read(path).await?;
        let state = from_json_bytes(&content)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Some(state))
    }

    async fn save(&self, state: &Workbench) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Err(StorageError::NoConfigDir);
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let content =
            to_json_stable_bytes(state).map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(path, content).await?;
        debug!(path = %path.display(), "workbench saved");
        Ok(())
    }
}
