//! Request history
//!
//! Executed requests, newest first, capped at [`HISTORY_LIMIT`].

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::RequestDefinition;

/// Maximum number of history entries kept.
pub const HISTORY_LIMIT: usize = 50;

/// Executed request snapshots, newest first.
///
/// Entries are owned copies, so later edits to the originating tab never
/// reach them, and closing the tab leaves them in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestHistory {
    entries: VecDeque<RequestDefinition>,
}

impl RequestHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Adds a snapshot at the front, evicting the oldest beyond the cap.
    pub fn record(&mut self, snapshot: RequestDefinition) {
        self.entries.push_front(snapshot);
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Drops the oldest entries beyond [`HISTORY_LIMIT`].
    pub fn enforce_limit(&mut self) {
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Returns all entries (newest first).
    #[must_use]
    pub const fn entries(&self) -> &VecDeque<RequestDefinition> {
        &self.entries
    }

    /// Returns the entry at a position (0 = newest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RequestDefinition> {
        self.entries.get(index)
    }

    /// Clears all history entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns a short "time ago" label for a history timestamp.
#[must_use]
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(at);

    if duration.num_seconds() < 60 {
        "just now".to_string()
    } else if duration.num_minutes() < 60 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_days() < 7 {
        format!("{}d ago", duration.num_days())
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}
