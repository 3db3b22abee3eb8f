//! Errors surfaced to the terminal.

use khabari_application::ApplicationError;
use khabari_application::ports::DispatchError;
use khabari_infrastructure::ConfigError;
use thiserror::Error;

/// Anything that stops a command.
#[derive(Debug, Error)]
pub enum AppError {
    /// A use case or the store failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("http client: {0}")]
    Dispatch(#[from] DispatchError),

    /// Writing output failed.
    #[error("output: {0}")]
    Io(#[from] std::io::Error),

    /// No tab matches the given position or id.
    #[error("unknown tab: {0}")]
    UnknownTab(String),

    /// The workbench refused the change.
    #[error("rejected: {0}")]
    Rejected(String),

    /// There is nothing to show.
    #[error("{0}")]
    Nothing(String),
}

/// Result alias for command execution.
pub type AppResult<T> = Result<T, AppError>;
