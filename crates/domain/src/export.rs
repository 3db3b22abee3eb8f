//! Response export: which part of a response to save, and under what name.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::response::ResponseRecord;

/// The response view being exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportView {
    /// The parsed body only.
    #[default]
    Data,
    /// The whole response record.
    Raw,
    /// The response headers.
    Headers,
}

impl ExportView {
    /// Returns the view name used in file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Raw => "raw",
            Self::Headers => "headers",
        }
    }

    /// Extracts the exported value from a response.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be converted to JSON, which
    /// cannot happen for records built by this crate.
    pub fn content(self, response: &ResponseRecord) -> serde_json::Result<Value> {
        match self {
            Self::Data => Ok(response.data.clone()),
            Self::Raw => serde_json::to_value(response),
            Self::Headers => serde_json::to_value(&response.headers),
        }
    }

    /// File name for an export made at `at`: `response-<view>-<ts>.json`.
    ///
    /// The timestamp is RFC 3339 UTC with milliseconds, with `:` and `.`
    /// replaced by `-` so the name is valid on every platform.
    #[must_use]
    pub fn file_name(self, at: DateTime<Utc>) -> String {
        let stamp = at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-");
        format!("response-{}-{stamp}.json", self.as_str())
    }
}

impl fmt::Display for ExportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportView {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "data" => Ok(Self::Data),
            "raw" => Ok(Self::Raw),
            "headers" => Ok(Self::Headers),
            _ => Err(DomainError::UnknownView(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn record() -> ResponseRecord {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        ResponseRecord {
            status: 201,
            status_text: "Created".into(),
            data: serde_json::json!({ "id": 7 }),
            headers,
            time_ms: 40,
            size: "8 bytes".into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn file_name_replaces_separators() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(678);
        assert_eq!(
            ExportView::Raw.file_name(at),
            "response-raw-2024-01-02T03-04-05-678Z.json"
        );
    }

    #[test]
    fn content_per_view() {
        let rec = record();
        assert_eq!(
            ExportView::Data.content(&rec).unwrap(),
            serde_json::json!({ "id": 7 })
        );
        assert_eq!(
            ExportView::Headers.content(&rec).unwrap(),
            serde_json::json!({ "content-type": "application/json" })
        );
        let raw = ExportView::Raw.content(&rec).unwrap();
        assert_eq!(raw["status"], 201);
        assert_eq!(raw["statusText"], "Created");
        assert_eq!(raw["time"], 40);
    }

    #[test]
    fn parse_view() {
        assert_eq!("RAW".parse::<ExportView>().unwrap(), ExportView::Raw);
        assert_eq!(
            "table".parse::<ExportView>(),
            Err(DomainError::UnknownView("table".into()))
        );
    }
}
