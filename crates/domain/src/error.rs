//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while parsing user input into domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The authorization type is not one of the known kinds.
    #[error("unknown auth type: {0}")]
    UnknownAuthType(String),

    /// The editor section name is not recognized.
    #[error("unknown editor section: {0}")]
    UnknownSection(String),

    /// The response view name is not recognized.
    #[error("unknown response view: {0}")]
    UnknownView(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
