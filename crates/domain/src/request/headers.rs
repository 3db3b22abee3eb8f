//! Request header map

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Header name to value. Names are unique and the last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    items: BTreeMap<String, String>,
}

impl Headers {
    /// Creates an empty header map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// The headers every new tab starts with.
    #[must_use]
    pub fn defaults() -> Self {
        [
            ("Accept", "application/json"),
            ("Content-Type", "application/json"),
        ]
        .into_iter()
        .collect()
    }

    /// Sets a header, replacing any previous value. The name is trimmed and
    /// empty names are ignored.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.items.insert(name.to_string(), value.into());
        true
    }

    /// Removes a header by exact name.
    pub fn remove(&mut self, name: &str) -> bool {
        self.items.remove(name).is_some()
    }

    /// Returns the value of a header by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items.get(name).map(String::as_str)
    }

    /// True if a header with this name exists, ignoring ASCII case.
    #[must_use]
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.items.keys().any(|k| k.eq_ignore_ascii_case(name))
    }

    /// Iterates `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_json() {
        let headers = Headers::defaults();
        assert_eq!(headers.get("Accept"), Some("application/json"));
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn last_write_wins() {
        let mut headers = Headers::new();
        headers.set("X-Trace", "1");
        headers.set("X-Trace", "2");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Trace"), Some("2"));
    }

    #[test]
    fn names_are_trimmed() {
        let mut headers = Headers::new();
        headers.set(" X-Trace ", "1");
        headers.set("X-Trace", "2");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Trace"), Some("2"));
    }

    #[test]
    fn empty_name_is_ignored() {
        let mut headers = Headers::new();
        assert!(!headers.set("  ", "value"));
        assert!(headers.is_empty());
    }

    #[test]
    fn case_insensitive_lookup() {
        let headers = Headers::defaults();
        assert!(headers.contains_ignore_case("content-type"));
        assert!(!headers.contains_ignore_case("authorization"));
    }
}
