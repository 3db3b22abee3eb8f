//! Last response per tab

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ResponseRecord;

/// Maps a tab id to the most recent response received for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseCache {
    entries: BTreeMap<String, ResponseRecord>,
}

impl ResponseCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Stores `response` for `tab_id`, replacing any previous entry.
    pub fn store(&mut self, tab_id: impl Into<String>, response: ResponseRecord) {
        self.entries.insert(tab_id.into(), response);
    }

    /// Returns the cached response for a tab.
    #[must_use]
    pub fn get(&self, tab_id: &str) -> Option<&ResponseRecord> {
        self.entries.get(tab_id)
    }

    /// Drops the entry for a closed tab.
    pub fn evict(&mut self, tab_id: &str) -> Option<ResponseRecord> {
        self.entries.remove(tab_id)
    }

    /// Ids of the tabs that have a cached response.
    pub fn tab_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of cached responses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
