//! Normalized response record

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The outcome of one send, success or failure.
///
/// A `status` of 0 marks a local or transport failure; `data` then holds
/// `{"error": <message>}`. Both shapes share the same rendering and storage
/// path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    /// HTTP status code, or 0 on failure
    pub status: u16,
    /// Reason phrase, or the failure message
    pub status_text: String,
    /// Parsed body
    pub data: Value,
    /// Response headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Round-trip time in milliseconds
    #[serde(rename = "time")]
    pub time_ms: u64,
    /// Human-readable body size
    pub size: String,
    /// When the record was produced
    pub timestamp: DateTime<Utc>,
}

impl ResponseRecord {
    /// Builds a record from a received response.
    ///
    /// The body is parsed as JSON when possible and otherwise kept as a JSON
    /// string; an empty body becomes `null`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn received(
        status: u16,
        status_text: impl Into<String>,
        headers: BTreeMap<String, String>,
        body: &[u8],
        elapsed: Duration,
        received_at: DateTime<Utc>,
    ) -> Self {
        let data = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
        };

        Self {
            status,
            status_text: status_text.into(),
            data,
            headers,
            // Truncation is acceptable: no round trip lasts 584 million years
            time_ms: elapsed.as_millis() as u64,
            size: format_size(body.len()),
            timestamp: received_at,
        }
    }

    /// Builds the status-0 record for a request that never got a response.
    #[must_use]
    pub fn failure(message: impl Into<String>, at: DateTime<Utc>) -> Self {
        let message = message.into();
        Self {
            status: 0,
            data: serde_json::json!({ "error": message }),
            status_text: message,
            headers: BTreeMap::new(),
            time_ms: 0,
            size: format_size(0),
            timestamp: at,
        }
    }

    /// True for a local or transport failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.status == 0
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the status code indicates a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns true if the status code indicates a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// The failure message carried by a status-0 record.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        if self.is_failure() {
            self.data.get("error").and_then(Value::as_str)
        } else {
            None
        }
    }
}

/// Formats a byte count as `N bytes`, `X.XX KB` or `X.XX MB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes < KB {
        format!("{bytes} bytes")
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}
