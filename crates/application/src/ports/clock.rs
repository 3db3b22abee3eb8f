//! Clock port

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Source of "now" for tab creation, history snapshots and failure records.
///
/// Tests substitute a fixed clock so timestamps are predictable.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
