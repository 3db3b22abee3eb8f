//! Writes exported response views to disk.

use std::path::PathBuf;

use khabari_application::ports::{ExportError, ExportWriter};
use serde_json::Value;
use tokio::fs;

use crate::serialization::to_json_stable_bytes;

/// Writes exports as pretty JSON files into one directory.
#[derive(Debug, Clone)]
pub struct FileExportWriter {
    dir: PathBuf,
}

impl FileExportWriter {
    /// Creates a writer targeting `dir`, created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportWriter for FileExportWriter {
    async fn write(&self, file_name: &str, content: &Value) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(file_name);
        let bytes =
            to_json_stable_bytes(content).map_err(|e| ExportError::Serialization(e.to_string()))?;
        fs::write(&path, bytes).await?;
        Ok(path)
    }
}
