//! Tab session: the open request tabs and which one is being edited.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::{RequestDefinition, RequestPatch};

/// Name of the tab the session starts with.
pub const SEED_TAB_NAME: &str = "New Request";

/// Editor section shown for the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Query parameter rows
    #[default]
    Params,
    /// Header rows
    Headers,
    /// Body editor
    Body,
    /// Authorization settings
    Auth,
}

impl Section {
    /// Returns the section name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Params => "params",
            Self::Headers => "headers",
            Self::Body => "body",
            Self::Auth => "auth",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "params" => Ok(Self::Params),
            "headers" => Ok(Self::Headers),
            "body" => Ok(Self::Body),
            "auth" => Ok(Self::Auth),
            _ => Err(DomainError::UnknownSection(s.to_string())),
        }
    }
}

/// What happened when a tab was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closed {
    /// An inactive tab was closed; the active tab is unchanged.
    Inactive,
    /// The active tab was closed and the first remaining tab took over.
    Active,
}

/// The ordered set of open tabs.
///
/// Never empty, and `active_tab` always names one of `tabs`. Deserialized
/// sessions that break this are repaired with [`TabSession::repair`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSession {
    tabs: Vec<RequestDefinition>,
    active_tab: String,
    #[serde(default)]
    active_section: Section,
}

impl TabSession {
    /// Starts a session with one default tab.
    #[must_use]
    pub fn new(seed_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        let seed = RequestDefinition::new(seed_id, SEED_TAB_NAME, now);
        Self {
            active_tab: seed.id.clone(),
            tabs: vec![seed],
            active_section: Section::default(),
        }
    }

    /// Tabs in display order.
    #[must_use]
    pub fn tabs(&self) -> &[RequestDefinition] {
        &self.tabs
    }

    /// Id of the active tab.
    #[must_use]
    pub fn active_id(&self) -> &str {
        &self.active_tab
    }

    /// The active tab.
    #[must_use]
    pub fn active(&self) -> Option<&RequestDefinition> {
        self.get(&self.active_tab)
    }

    /// The section shown for the active tab.
    #[must_use]
    pub const fn active_section(&self) -> Section {
        self.active_section
    }

    /// Looks up a tab by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RequestDefinition> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Looks up a tab by id for editing.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut RequestDefinition> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    /// True if a tab with this id is open.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Opens a default tab named `New Request N` and makes it active.
    ///
    /// Rejects an id that is already open.
    pub fn add_tab(&mut self, id: impl Into<String>, now: DateTime<Utc>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        let name = format!("{SEED_TAB_NAME} {}", self.tabs.len() + 1);
        self.active_tab.clone_from(&id);
        self.tabs.push(RequestDefinition::new(id, name, now));
        true
    }

    /// Closes a tab.
    ///
    /// Returns `None` when the id is unknown or it is the last tab. Closing
    /// the active tab activates the first remaining one.
    pub fn remove_tab(&mut self, id: &str) -> Option<Closed> {
        if self.tabs.len() <= 1 {
            return None;
        }
        let index = self.tabs.iter().position(|t| t.id == id)?;
        self.tabs.remove(index);

        if self.active_tab == id {
            self.active_tab = self.tabs[0].id.clone();
            Some(Closed::Active)
        } else {
            Some(Closed::Inactive)
        }
    }

    /// Shallow-merges `patch` into the tab with `id`.
    pub fn update_tab(&mut self, id: &str, patch: RequestPatch) -> bool {
        self.get_mut(id).is_some_and(|tab| {
            patch.apply(tab);
            true
        })
    }

    /// Switches the active tab. Unknown ids are ignored.
    pub fn set_active_tab(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.active_tab = id.to_string();
            true
        } else {
            false
        }
    }

    /// Switches the editor section.
    pub const fn set_active_section(&mut self, section: Section) {
        self.active_section = section;
    }

    /// Renames a tab. Blank names are rejected; others are trimmed.
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.get_mut(id).is_some_and(|tab| {
            tab.name = name.to_string();
            true
        })
    }

    /// Restores the invariants after loading from storage: re-seeds an
    /// empty session and points a dangling active id at the first tab.
    #[must_use]
    pub fn repair(mut self, seed_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        if self.tabs.is_empty() {
            return Self {
                active_section: self.active_section,
                ..Self::new(seed_id, now)
            };
        }
        if !self.contains(&self.active_tab) {
            self.active_tab = self.tabs[0].id.clone();
        }
        self
    }
}
