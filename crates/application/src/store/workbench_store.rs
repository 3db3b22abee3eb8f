//! The single-writer workbench store.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use khabari_domain::{RequestDefinition, ResponseRecord, Workbench, generate_id};
use tracing::{debug, info, warn};

use super::{Action, reduce};
use crate::ApplicationResult;
use crate::ports::{Clock, StateSink};

/// A send that has left the store and is waiting for the network.
///
/// Produced by [`WorkbenchStore::begin_send`] and handed back to
/// [`WorkbenchStore::finish_send`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSend {
    /// Tab that was active when the send started
    pub tab_id: String,
    /// Copy of that tab at send time
    pub request: RequestDefinition,
    /// When the send started
    pub started_at: DateTime<Utc>,
    token: u64,
}

/// Holds the workbench and is the only way to change it.
///
/// Every accepted [`Action`] is followed by a save through the sink.
/// In-flight sends are tracked per tab with a token; only the latest send
/// for a tab may write its response.
pub struct WorkbenchStore<S: StateSink> {
    state: Workbench,
    sink: Arc<S>,
    clock: Arc<dyn Clock>,
    in_flight: HashMap<String, u64>,
    next_token: u64,
}

impl<S: StateSink> WorkbenchStore<S> {
    /// Creates a store over an existing state.
    #[must_use]
    pub fn new(state: Workbench, sink: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state,
            sink,
            clock,
            in_flight: HashMap::new(),
            next_token: 0,
        }
    }

    /// Loads the stored state, falling back to a fresh workbench when
    /// nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored blob exists but cannot be read.
    pub async fn open(sink: Arc<S>, clock: Arc<dyn Clock>) -> ApplicationResult<Self> {
        let now = clock.now();
        let state = match sink.load().await? {
            Some(stored) => stored.repair(generate_id(), now),
            None => {
                debug!("no stored workbench, starting fresh");
                Workbench::new(generate_id(), now)
            }
        };
        Ok(Self::new(state, sink, clock))
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &Workbench {
        &self.state
    }

    /// The current time according to the store's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// True while any send is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Applies an action and persists the result.
    ///
    /// Returns whether the action was accepted. Rejected actions are not
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns a storage error if saving fails. The in-memory state has
    /// already been updated at that point.
    pub async fn dispatch(&mut self, action: Action) -> ApplicationResult<bool> {
        let kind = action.kind();
        let now = self.clock.now();
        if !reduce(&mut self.state, action, now) {
            debug!(action = kind, "action rejected");
            return Ok(false);
        }
        debug!(action = kind, "action applied");
        self.persist().await?;
        Ok(true)
    }

    /// Starts a send from the active tab.
    ///
    /// Captures a snapshot and a fresh token for the tab. A newer send for
    /// the same tab supersedes any earlier one still in flight.
    #[must_use]
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        let tab = self.state.active_tab()?;
        let started_at = self.clock.now();
        self.next_token += 1;
        let pending = PendingSend {
            tab_id: tab.id.clone(),
            request: tab.snapshot(started_at),
            started_at,
            token: self.next_token,
        };
        self.in_flight.insert(pending.tab_id.clone(), pending.token);
        info!(tab = %pending.tab_id, url = %pending.request.full_url(), "send started");
        Some(pending)
    }

    /// Completes a send.
    ///
    /// Failures become a status-0 record. The snapshot always enters
    /// history. The response is cached for the originating tab unless that
    /// tab was closed or a newer send for it has started; it is displayed
    /// only if the tab is still active. Returns the record that was cached,
    /// if any.
    ///
    /// # Errors
    ///
    /// Returns a storage error if saving fails.
    pub async fn finish_send<E: fmt::Display>(
        &mut self,
        pending: PendingSend,
        outcome: Result<ResponseRecord, E>,
    ) -> ApplicationResult<Option<ResponseRecord>> {
        let response = match outcome {
            Ok(response) => response,
            Err(err) => ResponseRecord::failure(err.to_string(), self.clock.now()),
        };

        let latest = self.in_flight.get(&pending.tab_id) == Some(&pending.token);
        if latest {
            self.in_flight.remove(&pending.tab_id);
        }

        let now = self.clock.now();
        reduce(
            &mut self.state,
            Action::RecordHistory(pending.request.snapshot(now)),
            now,
        );

        let cached = if !latest {
            warn!(tab = %pending.tab_id, "discarding superseded response");
            None
        } else if reduce(
            &mut self.state,
            Action::RecordTabResponse {
                tab_id: pending.tab_id.clone(),
                response: response.clone(),
            },
            now,
        ) {
            info!(
                tab = %pending.tab_id,
                status = response.status,
                time_ms = response.time_ms,
                "send finished"
            );
            Some(response)
        } else {
            warn!(tab = %pending.tab_id, "tab closed before response arrived");
            None
        };

        self.persist().await?;
        Ok(cached)
    }

    async fn persist(&self) -> ApplicationResult<()> {
        if let Err(err) = self.sink.save(&self.state).await {
            warn!(error = %err, "failed to persist workbench");
            return Err(err.into());
        }
        Ok(())
    }
}
