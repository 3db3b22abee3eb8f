//! Export writer port

use std::future::Future;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Error type for writing exports.
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error while writing the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The exported value could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for saving an exported response view.
pub trait ExportWriter: Send + Sync {
    /// Writes `content` as pretty JSON under `file_name` and returns the
    /// full path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be encoded or written.
    fn write(
        &self,
        file_name: &str,
        content: &Value,
    ) -> impl Future<Output = Result<PathBuf, ExportError>> + Send;
}
