//! JSON serialization helpers.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Pretty-prints `value` with 2-space indentation and no trailing newline.
fn to_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"  "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Serializes a value to deterministic JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializationError> {
    let mut json = to_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Same as [`to_json_stable`] but returns bytes for direct file writing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SerializationError> {
    Ok(to_json_stable(value)?.into_bytes())
}

/// Deserializes JSON from bytes, pretty or minified.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

/// Re-indents JSON text with 2 spaces, keeping key order.
///
/// Returns `None` for blank or invalid input so callers can leave the text
/// as typed.
#[must_use]
pub fn format_json(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    to_pretty(&value).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn stable_output_is_indented_with_trailing_newline() {
        let mut map = BTreeMap::new();
        map.insert("zebra", 1);
        map.insert("apple", 2);

        let json = to_json_stable(&map).unwrap();
        assert_eq!(json, "{\n  \"apple\": 2,\n  \"zebra\": 1\n}\n");
    }

    #[test]
    fn from_json_bytes_accepts_minified() {
        let value: serde_json::Value = from_json_bytes(br#"{"name":"test"}"#).unwrap();
        assert_eq!(value["name"], "test");
        assert!(from_json_bytes::<serde_json::Value>(b"{nope").is_err());
    }

    #[test]
    fn format_json_keeps_key_order() {
        let formatted = format_json(r#"{"b":1,"a":[true,null]}"#).unwrap();
        assert_eq!(
            formatted,
            "{\n  \"b\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn format_json_rejects_blank_and_invalid() {
        assert_eq!(format_json("   "), None);
        assert_eq!(format_json("{\"a\":"), None);
    }
}
