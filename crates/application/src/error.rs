//! Application error types

use thiserror::Error;
use khabari_domain::DomainError;

use crate::ports::{DispatchError, ExportError, StorageError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Dispatching a request failed.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Loading or saving the workbench failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Writing an export failed.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
