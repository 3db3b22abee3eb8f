//! The whole workbench state and the rules that keep its parts consistent.
//!
//! [`Workbench`] is also the persisted blob: its serialized form is
//! `{tabs, activeTab, activeSection, response, tabResponses, history,
//! collections}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::{CollectionItem, CollectionTree};
use crate::history::RequestHistory;
use crate::id::generate_id;
use crate::request::{RequestDefinition, RequestPatch};
use crate::response::{ResponseCache, ResponseRecord};
use crate::session::{Closed, Section, TabSession};

/// Tabs, responses, history and collections.
///
/// The displayed `response` is always either `None` or the cache entry of
/// the active tab as of the last switch or completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workbench {
    #[serde(flatten)]
    session: TabSession,
    #[serde(default)]
    response: Option<ResponseRecord>,
    #[serde(default)]
    tab_responses: ResponseCache,
    #[serde(default)]
    history: RequestHistory,
    #[serde(default)]
    collections: CollectionTree,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(generate_id(), Utc::now())
    }
}

impl Workbench {
    /// Creates the initial state with a single `New Request` tab.
    #[must_use]
    pub fn new(seed_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            session: TabSession::new(seed_id, now),
            response: None,
            tab_responses: ResponseCache::new(),
            history: RequestHistory::new(),
            collections: CollectionTree::new(),
        }
    }

    /// Repairs a state read back from storage.
    ///
    /// Besides the tab-session fixes, cache entries for tabs that no longer
    /// exist are dropped and history is cut back to its limit.
    #[must_use]
    pub fn repair(mut self, seed_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        self.session = self.session.repair(seed_id, now);
        self.history.enforce_limit();
        let orphans: Vec<String> = self
            .tab_responses
            .tab_ids()
            .filter(|id| !self.session.contains(id))
            .map(str::to_string)
            .collect();
        for id in orphans {
            self.tab_responses.evict(&id);
        }
        self
    }

    /// The tab session.
    #[must_use]
    pub const fn session(&self) -> &TabSession {
        &self.session
    }

    /// The active tab.
    #[must_use]
    pub fn active_tab(&self) -> Option<&RequestDefinition> {
        self.session.active()
    }

    /// The response currently on display.
    #[must_use]
    pub const fn response(&self) -> Option<&ResponseRecord> {
        self.response.as_ref()
    }

    /// Last response per tab.
    #[must_use]
    pub const fn tab_responses(&self) -> &ResponseCache {
        &self.tab_responses
    }

    /// Executed requests, newest first.
    #[must_use]
    pub const fn history(&self) -> &RequestHistory {
        &self.history
    }

    /// The collection tree.
    #[must_use]
    pub const fn collections(&self) -> &CollectionTree {
        &self.collections
    }

    // --- tabs ---

    /// Opens a new default tab and makes it active.
    ///
    /// The new tab has no cached response, so the display is cleared. An id
    /// that is already open is rejected and nothing changes.
    pub fn add_tab(&mut self, id: impl Into<String>, now: DateTime<Utc>) -> bool {
        if !self.session.add_tab(id, now) {
            return false;
        }
        self.response = None;
        true
    }

    /// Closes a tab and drops its cached response.
    pub fn remove_tab(&mut self, id: &str) -> bool {
        match self.session.remove_tab(id) {
            None => false,
            Some(closed) => {
                self.tab_responses.evict(id);
                if closed == Closed::Active {
                    self.response = None;
                }
                true
            }
        }
    }

    /// Shallow-merges a patch into a tab.
    pub fn update_tab(&mut self, id: &str, patch: RequestPatch) -> bool {
        self.session.update_tab(id, patch)
    }

    /// Runs an in-place edit against a tab.
    ///
    /// The closure reports whether it changed anything; an unknown id
    /// reports `false` without calling it.
    pub fn edit_tab(&mut self, id: &str, edit: impl FnOnce(&mut RequestDefinition) -> bool) -> bool {
        self.session.get_mut(id).is_some_and(edit)
    }

    /// Switches tabs and shows the new tab's cached response, if any.
    pub fn set_active_tab(&mut self, id: &str) -> bool {
        if !self.session.set_active_tab(id) {
            return false;
        }
        self.response = self.tab_responses.get(id).cloned();
        true
    }

    /// Switches the editor section.
    pub const fn set_active_section(&mut self, section: Section) {
        self.session.set_active_section(section);
    }

    /// Renames a tab.
    pub fn rename_tab(&mut self, id: &str, name: &str) -> bool {
        self.session.rename(id, name)
    }

    // --- responses and history ---

    /// Caches a response for the active tab and displays it.
    pub fn record_response(&mut self, response: ResponseRecord) {
        let active = self.session.active_id().to_string();
        self.tab_responses.store(active, response.clone());
        self.response = Some(response);
    }

    /// Caches a response for `tab_id`, displaying it only if that tab is
    /// active. Returns `false` when the tab has been closed.
    pub fn record_tab_response(&mut self, tab_id: &str, response: ResponseRecord) -> bool {
        if !self.session.contains(tab_id) {
            return false;
        }
        if self.session.active_id() == tab_id {
            self.response = Some(response.clone());
        }
        self.tab_responses.store(tab_id, response);
        true
    }

    /// Prepends an executed request to history.
    pub fn record_history(&mut self, snapshot: RequestDefinition) {
        self.history.record(snapshot);
    }

    /// Empties history. Returns `false` if it was already empty.
    pub fn clear_history(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        self.history.clear();
        true
    }

    // --- collections ---

    /// Adds a collection (no parent) or folder.
    pub fn add_collection(
        &mut self,
        id: impl Into<String>,
        name: &str,
        parent_id: Option<&str>,
    ) -> bool {
        self.collections.add(id, name, parent_id)
    }

    /// Renames a collection node.
    pub fn rename_collection(&mut self, id: &str, name: &str) -> bool {
        self.collections.rename(id, name)
    }

    /// Deletes a collection node and its subtree.
    pub fn delete_collection(&mut self, id: &str) -> bool {
        self.collections.delete(id)
    }

    /// Filtered view of the collection tree.
    #[must_use]
    pub fn search_collections(&self, query: &str) -> Vec<CollectionItem> {
        self.collections.search(query)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::history::HISTORY_LIMIT;
    use crate::request::HttpMethod;
    use pretty_assertions::assert_eq;

    fn ok(text: &str) -> ResponseRecord {
        ResponseRecord {
            status: 200,
            status_text: text.to_string(),
            data: serde_json::json!({ "from": text }),
            headers: std::collections::BTreeMap::new(),
            time_ms: 12,
            size: "10 bytes".into(),
            timestamp: Utc::now(),
        }
    }

    fn bench() -> Workbench {
        Workbench::new("t1", Utc::now())
    }

    #[test]
    fn switching_tabs_restores_cached_response() {
        let mut wb = bench();
        wb.record_response(ok("one"));
        wb.add_tab("t2", Utc::now());
        assert!(wb.response().is_none());

        wb.record_response(ok("two"));
        assert!(wb.set_active_tab("t1"));
        assert_eq!(wb.response().map(|r| r.status_text.as_str()), Some("one"));
        assert!(wb.set_active_tab("t2"));
        assert_eq!(wb.response().map(|r| r.status_text.as_str()), Some("two"));
        assert_eq!(wb.tab_responses().len(), 2);
    }

    #[test]
    fn switching_to_tab_without_response_clears_display() {
        let mut wb = bench();
        wb.add_tab("t2", Utc::now());
        wb.record_response(ok("two"));
        wb.set_active_tab("t1");
        assert!(wb.response().is_none());
    }

    #[test]
    fn removing_active_tab_evicts_and_clears() {
        let mut wb = bench();
        wb.add_tab("t2", Utc::now());
        wb.record_response(ok("two"));

        assert!(wb.remove_tab("t2"));

        assert_eq!(wb.session().active_id(), "t1");
        assert!(wb.response().is_none());
        assert!(wb.tab_responses().get("t2").is_none());
    }

    #[test]
    fn removing_inactive_tab_keeps_display() {
        let mut wb = bench();
        wb.record_response(ok("one"));
        wb.add_tab("t2", Utc::now());
        wb.record_response(ok("two"));
        wb.set_active_tab("t1");

        assert!(wb.remove_tab("t2"));
        assert_eq!(wb.response().map(|r| r.status_text.as_str()), Some("one"));
        assert!(!wb.remove_tab("t1"));
    }

    #[test]
    fn tab_response_for_background_tab_does_not_change_display() {
        let mut wb = bench();
        wb.add_tab("t2", Utc::now());
        wb.record_response(ok("two"));

        assert!(wb.record_tab_response("t1", ok("late")));

        assert_eq!(wb.response().map(|r| r.status_text.as_str()), Some("two"));
        assert_eq!(
            wb.tab_responses().get("t1").map(|r| r.status_text.as_str()),
            Some("late")
        );
        assert!(!wb.record_tab_response("closed", ok("x")));
    }

    #[test]
    fn history_survives_tab_removal() {
        let mut wb = bench();
        wb.add_tab("t2", Utc::now());
        let snapshot = wb.active_tab().unwrap().snapshot(Utc::now());
        wb.record_history(snapshot);
        wb.remove_tab("t2");
        assert_eq!(wb.history().len(), 1);
        assert_eq!(wb.history().get(0).map(|r| r.id.as_str()), Some("t2"));
        assert!(wb.clear_history());
        assert!(!wb.clear_history());
    }

    #[test]
    fn edit_tab_misses_unknown_id() {
        let mut wb = bench();
        assert!(!wb.edit_tab("ghost", |_| true));
        assert!(wb.edit_tab("t1", |tab| {
            tab.method = HttpMethod::Put;
            true
        }));
        assert_eq!(wb.active_tab().map(|t| t.method), Some(HttpMethod::Put));
    }

    #[test]
    fn persisted_shape_uses_camel_case_keys() {
        let mut wb = bench();
        wb.record_response(ok("one"));
        wb.add_collection("c1", "Users", None);
        let json = serde_json::to_value(&wb).unwrap();

        for key in [
            "tabs",
            "activeTab",
            "activeSection",
            "response",
            "tabResponses",
            "history",
            "collections",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["activeSection"], "params");

        let back: Workbench = serde_json::from_value(json).unwrap();
        assert_eq!(back, wb);
    }

    #[test]
    fn repair_drops_orphan_cache_entries() {
        let mut wb = bench();
        wb.record_response(ok("one"));
        let mut json = serde_json::to_value(&wb).unwrap();
        json["tabResponses"]["ghost"] = json["tabResponses"]["t1"].clone();

        let loaded: Workbench = serde_json::from_value(json).unwrap();
        let repaired = loaded.repair("seed", Utc::now());
        assert_eq!(repaired.tab_responses().len(), 1);
        assert!(repaired.tab_responses().get("t1").is_some());
    }

    #[test]
    fn repair_caps_oversized_history() {
        let wb = bench();
        let mut json = serde_json::to_value(&wb).unwrap();
        let entries: Vec<serde_json::Value> = (0..60)
            .map(|i| {
                let req = RequestDefinition::new(format!("h{i}"), "New Request", Utc::now());
                serde_json::to_value(req).unwrap()
            })
            .collect();
        json["history"] = serde_json::Value::Array(entries);

        let loaded: Workbench = serde_json::from_value(json).unwrap();
        assert_eq!(loaded.history().len(), 60);

        let repaired = loaded.repair("seed", Utc::now());
        assert_eq!(repaired.history().len(), HISTORY_LIMIT);
        assert_eq!(repaired.history().get(0).map(|e| e.id.as_str()), Some("h0"));
        assert_eq!(repaired.history().get(49).map(|e| e.id.as_str()), Some("h49"));
    }
}
