//! Query parameter types and the URL ⇄ parameter-list synchronizer.
//!
//! A tab keeps its query in two shapes: the structured [`QueryParams`] list
//! and the query string of the URL shown to the user. [`QueryParams::parse`]
//! goes from text to list, [`QueryParams::rebuild`] from list to text. Callers
//! run exactly one of them per edit.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A query parameter row.
///
/// Disabled rows stay in the list so they can be re-enabled, but never reach
/// the rebuilt URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// The parameter key
    pub key: String,
    /// The parameter value
    pub value: String,
    /// Whether this parameter is sent
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl QueryParam {
    /// Creates a new enabled query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled query parameter.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: false,
        }
    }

    /// True when both key and value are empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }

    fn is_sent(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }
}

/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    items: Vec<QueryParam>,
}

impl QueryParams {
    /// Creates an empty query parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Splits `url` into its base and its decoded query parameters.
    ///
    /// Everything after the first `?` is the query. Pairs are separated by
    /// `&` and split at the first `=`; a pair without `=` gets an empty
    /// value. Keys and values are percent-decoded (`+` stays a plus sign).
    /// Every parsed parameter is enabled.
    #[must_use]
    pub fn parse(url: &str) -> (String, Self) {
        let Some((base, query)) = url.split_once('?') else {
            return (url.to_string(), Self::new());
        };

        let items = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                QueryParam::new(decode(key), decode(value))
            })
            .collect();

        (base.to_string(), Self { items })
    }

    /// Appends the enabled, non-empty-key parameters to `base` as a query
    /// string, preserving order. Returns `base` unchanged when none qualify.
    #[must_use]
    pub fn rebuild(&self, base: &str) -> String {
        let query = self
            .items
            .iter()
            .filter(|p| p.is_sent())
            .map(|p| format!("{}={}", urlencoding::encode(&p.key), urlencoding::encode(&p.value)))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{query}")
        }
    }

    /// Writes a row at `index`, appending when `index` equals the length.
    ///
    /// Trailing rows with an empty key and an empty value are pruned
    /// afterwards, so filling the pending blank row and clearing it again
    /// leaves the list as it was. Returns `false` when `index` is past the
    /// pending row.
    pub fn set_field(
        &mut self,
        index: usize,
        key: impl Into<String>,
        value: impl Into<String>,
        enabled: bool,
    ) -> bool {
        let row = QueryParam {
            key: key.into(),
            value: value.into(),
            enabled,
        };

        match index.cmp(&self.items.len()) {
            std::cmp::Ordering::Less => self.items[index] = row,
            std::cmp::Ordering::Equal => self.items.push(row),
            std::cmp::Ordering::Greater => return false,
        }

        while self.items.last().is_some_and(QueryParam::is_blank) {
            self.items.pop();
        }
        true
    }

    /// Flips `enabled` on one row, keeping its key and value.
    pub fn toggle(&mut self, index: usize) -> bool {
        self.items.get_mut(index).is_some_and(|p| {
            p.enabled = !p.enabled;
            true
        })
    }

    /// Removes one row; later rows shift down.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.items.remove(index);
            true
        } else {
            false
        }
    }

    /// Adds a row at the end without pruning.
    pub fn add(&mut self, param: QueryParam) {
        self.items.push(param);
    }

    /// Returns an iterator over enabled parameters.
    pub fn enabled(&self) -> impl Iterator<Item = &QueryParam> {
        self.items.iter().filter(|p| p.enabled)
    }

    /// Returns all parameters (enabled and disabled).
    #[must_use]
    pub fn all(&self) -> &[QueryParam] {
        &self.items
    }

    /// Returns the row at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&QueryParam> {
        self.items.get(index)
    }

    /// Returns the number of parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<QueryParam> for QueryParams {
    fn from_iter<T: IntoIterator<Item = QueryParam>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), Cow::into_owned)
}
