//! Dispatcher port
//!
//! Sends one request over the wire and reports either a normalized
//! [`ResponseRecord`] or the reason nothing came back.

use std::future::Future;

use khabari_domain::{RequestDefinition, ResponseRecord};
use thiserror::Error;

/// Transport-level failure reported by a [`Dispatcher`].
///
/// The display text becomes the `statusText` and `data.error` of the
/// status-0 record built from it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No response arrived within the configured timeout.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed
        timeout_ms: u64,
    },

    /// The host name did not resolve.
    #[error("Could not resolve host '{host}': {message}")]
    DnsError {
        /// Host that failed to resolve
        host: String,
        /// Resolver message
        message: String,
    },

    /// The server actively refused the connection.
    #[error("Connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host
        host: String,
        /// Target port
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect chain exceeded the configured limit.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// The redirect limit
        max: usize,
    },

    /// The request body could not be sent.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// Implementations apply the method, full URL, headers, auth and body of the
/// definition, and measure elapsed time and body size.
pub trait Dispatcher: Send + Sync {
    /// Executes `request` and returns the received response.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when no HTTP response was received.
    fn dispatch(
        &self,
        request: &RequestDefinition,
    ) -> impl Future<Output = Result<ResponseRecord, DispatchError>> + Send;
}
