//! Send Request Use Case
//!
//! Validates the active tab, executes it through the [`Dispatcher`] port and
//! records the outcome in the store.

use std::sync::Arc;

use khabari_domain::{RequestDefinition, ResponseRecord};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::ApplicationResult;
use crate::ports::{DispatchError, Dispatcher, StateSink};
use crate::store::WorkbenchStore;

/// Error type for the send request use case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendRequestError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is not an http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The dispatcher failed.
    #[error("{0}")]
    Dispatch(#[from] DispatchError),
}

/// Use case for sending the active tab's request.
///
/// The store lock is released while the request is on the wire, so the
/// session can keep changing; the response is then filed under the tab the
/// send started from.
pub struct SendRequest<D: Dispatcher> {
    dispatcher: Arc<D>,
}

impl<D: Dispatcher> SendRequest<D> {
    /// Creates a new `SendRequest` use case with the given dispatcher.
    pub const fn new(dispatcher: Arc<D>) -> Self {
        Self { dispatcher }
    }

    /// Validates and executes one request.
    ///
    /// # Errors
    ///
    /// Returns `SendRequestError` on validation or transport failures.
    pub async fn execute(
        &self,
        request: &RequestDefinition,
    ) -> Result<ResponseRecord, SendRequestError> {
        validate(request)?;
        Ok(self.dispatcher.dispatch(request).await?)
    }

    /// Sends the active tab of the store.
    ///
    /// Returns the cached response record, or `None` if the completion was
    /// discarded because its tab was closed or re-sent meanwhile. Transport
    /// failures are not errors here; they arrive as status-0 records.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store fails to persist the result.
    pub async fn run<S: StateSink>(
        &self,
        store: &Mutex<WorkbenchStore<S>>,
    ) -> ApplicationResult<Option<ResponseRecord>> {
        let Some(pending) = store.lock().await.begin_send() else {
            return Ok(None);
        };

        let outcome = self.execute(&pending.request).await;

        store.lock().await.finish_send(pending, outcome).await
    }
}

/// Checks the request before dispatch.
fn validate(request: &RequestDefinition) -> Result<(), SendRequestError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(SendRequestError::EmptyUrl);
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(SendRequestError::InvalidUrl(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Action;
    use crate::store::testing::{MemorySink, fixed_clock, store};
    use chrono::Utc;
    use khabari_domain::Workbench;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Mock dispatcher for testing.
    struct MockDispatcher {
        response: Result<ResponseRecord, DispatchError>,
        gate: Option<Arc<Notify>>,
    }

    impl MockDispatcher {
        fn success() -> Self {
            Self {
                response: Ok(ResponseRecord::received(
                    200,
                    "OK",
                    BTreeMap::new(),
                    br#"{"ok":true}"#,
                    Duration::from_millis(50),
                    Utc::now(),
                )),
                gate: None,
            }
        }

        fn error(err: DispatchError) -> Self {
            Self {
                response: Err(err),
                gate: None,
            }
        }
    }

    impl Dispatcher for MockDispatcher {
        async fn dispatch(
            &self,
            _request: &RequestDefinition,
        ) -> Result<ResponseRecord, DispatchError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.response.clone()
        }
    }

    fn request(url: &str) -> RequestDefinition {
        let mut req = RequestDefinition::new("t1", "Test", Utc::now());
        req.edit_url(url);
        req
    }

    #[tokio::test]
    async fn test_execute_success() {
        let use_case = SendRequest::new(Arc::new(MockDispatcher::success()));
        let result = use_case.execute(&request("https://api.example.com/test")).await;
        assert_eq!(result.map(|r| r.status), Ok(200));
    }

    #[tokio::test]
    async fn test_execute_empty_url() {
        let use_case = SendRequest::new(Arc::new(MockDispatcher::success()));
        let result = use_case.execute(&request("   ")).await;
        assert_eq!(result, Err(SendRequestError::EmptyUrl));
    }

    #[tokio::test]
    async fn test_execute_invalid_url() {
        let use_case = SendRequest::new(Arc::new(MockDispatcher::success()));
        let result = use_case.execute(&request("ftp://files.example.com")).await;
        assert!(matches!(result, Err(SendRequestError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_execute_transport_error() {
        let use_case = SendRequest::new(Arc::new(MockDispatcher::error(DispatchError::Timeout {
            timeout_ms: 5000,
        })));
        let result = use_case.execute(&request("https://api.example.com/test")).await;
        assert!(matches!(
            result,
            Err(SendRequestError::Dispatch(DispatchError::Timeout { .. }))
        ));
    }

    #[tokio::test]
    async fn run_with_empty_url_records_status_zero() {
        let (store, _sink) = store();
        let store = Mutex::new(store);
        let use_case = SendRequest::new(Arc::new(MockDispatcher::success()));

        let record = use_case.run(&store).await.ok().flatten();

        let record = record.map(|r| (r.status, r.data));
        assert_eq!(
            record,
            Some((0, serde_json::json!({ "error": "URL is required" })))
        );
        let guard = store.lock().await;
        assert_eq!(guard.state().history().len(), 1);
        assert_eq!(guard.state().response().map(|r| r.size.as_str()), Some("0 bytes"));
    }

    #[tokio::test]
    async fn run_success_caches_and_records_history() {
        let (mut store, sink) = store();
        let _ = store
            .dispatch(Action::EditUrl {
                id: "t1".into(),
                url: "https://api.example.com/users?page=2".into(),
            })
            .await;
        let store = Mutex::new(store);
        let use_case = SendRequest::new(Arc::new(MockDispatcher::success()));

        let record = use_case.run(&store).await.ok().flatten();

        assert_eq!(record.map(|r| r.data), Some(serde_json::json!({ "ok": true })));
        let guard = store.lock().await;
        let entry = guard.state().history().get(0);
        assert_eq!(
            entry.map(RequestDefinition::full_url),
            Some("https://api.example.com/users?page=2".to_string())
        );
        assert_eq!(entry.map(|e| e.timestamp), Some(guard.now()));
        assert!(sink.save_count() >= 2);
    }

    #[tokio::test]
    async fn switching_tabs_mid_flight_keeps_display() {
        let sink = Arc::new(MemorySink::default());
        let clock = fixed_clock();
        let mut state = Workbench::new("t1", clock.now());
        state.edit_tab("t1", |tab| {
            tab.edit_url("https://api.example.com/slow");
            true
        });
        let store = Arc::new(Mutex::new(WorkbenchStore::new(state, sink, clock)));

        let gate = Arc::new(Notify::new());
        let use_case = Arc::new(SendRequest::new(Arc::new(MockDispatcher {
            gate: Some(Arc::clone(&gate)),
            ..MockDispatcher::success()
        })));

        let task = {
            let store = Arc::clone(&store);
            let use_case = Arc::clone(&use_case);
            tokio::spawn(async move { use_case.run(&store).await })
        };

        // Wait until the send has started, then switch to a new tab.
        while !store.lock().await.is_loading() {
            tokio::task::yield_now().await;
        }
        let _ = store.lock().await.dispatch(Action::add_tab()).await;
        gate.notify_one();
        let _ = task.await;

        let guard = store.lock().await;
        assert!(guard.state().response().is_none());
        assert_eq!(
            guard.state().tab_responses().get("t1").map(|r| r.status),
            Some(200)
        );
        assert!(!guard.is_loading());
    }
}
