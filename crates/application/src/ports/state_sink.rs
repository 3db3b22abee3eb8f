//! Persistence port for the workbench blob

use std::future::Future;

use khabari_domain::Workbench;
use thiserror::Error;

/// Error type for loading or saving the workbench.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored blob could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No location is available for the blob.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Port for persisting the whole workbench state.
///
/// Every accepted mutation is followed by a `save`; last write wins.
pub trait StateSink: Send + Sync {
    /// Reads the stored state, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob exists but cannot be read or parsed.
    fn load(&self) -> impl Future<Output = Result<Option<Workbench>, StorageError>> + Send;

    /// Replaces the stored state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be serialized or written.
    fn save(&self, state: &Workbench) -> impl Future<Output = Result<(), StorageError>> + Send;
}
