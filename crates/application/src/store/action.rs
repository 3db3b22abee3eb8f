//! Workbench mutations and the reducer that applies them.

use chrono::{DateTime, Utc};
use khabari_domain::{
    AuthType, HttpMethod, RequestDefinition, RequestPatch, ResponseRecord, Section, Workbench,
    generate_id,
};

/// One mutation of the workbench.
///
/// Ids for new tabs and collection nodes are carried by the action so that
/// [`reduce`] stays deterministic; [`Action::add_tab`] and
/// [`Action::add_collection`] generate them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Open a default tab and activate it.
    AddTab {
        /// Id of the new tab
        id: String,
    },
    /// Close a tab.
    RemoveTab {
        /// Tab to close
        id: String,
    },
    /// Shallow-merge fields into a tab.
    UpdateTab {
        /// Target tab
        id: String,
        /// Fields to replace
        patch: RequestPatch,
    },
    /// Switch the active tab.
    SetActiveTab {
        /// Tab to activate
        id: String,
    },
    /// Switch the editor section.
    SetActiveSection(Section),
    /// Rename a tab.
    RenameTab {
        /// Target tab
        id: String,
        /// New name, trimmed
        name: String,
    },
    /// Text typed into the URL field; its query replaces the param list.
    EditUrl {
        /// Target tab
        id: String,
        /// Full URL text
        url: String,
    },
    /// Change the HTTP method.
    SetMethod {
        /// Target tab
        id: String,
        /// New method
        method: HttpMethod,
    },
    /// Edit or append a query-param row.
    SetParam {
        /// Target tab
        id: String,
        /// Row index; `len` appends
        index: usize,
        /// Param name
        key: String,
        /// Param value
        value: String,
        /// Whether the row is sent
        enabled: bool,
    },
    /// Flip a param row on or off.
    ToggleParam {
        /// Target tab
        id: String,
        /// Row index
        index: usize,
    },
    /// Delete a param row.
    RemoveParam {
        /// Target tab
        id: String,
        /// Row index
        index: usize,
    },
    /// Set a header value.
    SetHeader {
        /// Target tab
        id: String,
        /// Header name
        name: String,
        /// Header value
        value: String,
    },
    /// Delete a header.
    RemoveHeader {
        /// Target tab
        id: String,
        /// Header name
        name: String,
    },
    /// Replace the body text.
    SetBody {
        /// Target tab
        id: String,
        /// New body
        body: String,
    },
    /// Change the auth type, clearing its fields.
    SetAuthType {
        /// Target tab
        id: String,
        /// New auth type
        kind: AuthType,
    },
    /// Set one auth field.
    SetAuthField {
        /// Target tab
        id: String,
        /// Field name, e.g. `token`
        key: String,
        /// Field value
        value: String,
    },
    /// Cache a response for the active tab and display it.
    RecordResponse(ResponseRecord),
    /// Cache a response for a specific tab.
    RecordTabResponse {
        /// Originating tab
        tab_id: String,
        /// Response to store
        response: ResponseRecord,
    },
    /// Prepend an executed request to history.
    RecordHistory(RequestDefinition),
    /// Empty the history.
    ClearHistory,
    /// Add a root collection or a nested folder.
    AddCollection {
        /// Id of the new node
        id: String,
        /// Display name, trimmed
        name: String,
        /// Parent node; `None` adds a root collection
        parent_id: Option<String>,
    },
    /// Rename a collection node.
    RenameCollection {
        /// Target node
        id: String,
        /// New name, trimmed
        name: String,
    },
    /// Delete a collection node with its subtree.
    DeleteCollection {
        /// Target node
        id: String,
    },
}

impl Action {
    /// An [`Action::AddTab`] with a fresh id.
    #[must_use]
    pub fn add_tab() -> Self {
        Self::AddTab { id: generate_id() }
    }

    /// An [`Action::AddCollection`] with a fresh id.
    #[must_use]
    pub fn add_collection(name: impl Into<String>, parent_id: Option<String>) -> Self {
        Self::AddCollection {
            id: generate_id(),
            name: name.into(),
            parent_id,
        }
    }

    /// Short name used in log lines.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddTab { .. } => "add_tab",
            Self::RemoveTab { .. } => "remove_tab",
            Self::UpdateTab { .. } => "update_tab",
            Self::SetActiveTab { .. } => "set_active_tab",
            Self::SetActiveSection(_) => "set_active_section",
            Self::RenameTab { .. } => "rename_tab",
            Self::EditUrl { .. } => "edit_url",
            Self::SetMethod { .. } => "set_method",
            Self::SetParam { .. } => "set_param",
            Self::ToggleParam { .. } => "toggle_param",
            Self::RemoveParam { .. } => "remove_param",
            Self::SetHeader { .. } => "set_header",
            Self::RemoveHeader { .. } => "remove_header",
            Self::SetBody { .. } => "set_body",
            Self::SetAuthType { .. } => "set_auth_type",
            Self::SetAuthField { .. } => "set_auth_field",
            Self::RecordResponse(_) => "record_response",
            Self::RecordTabResponse { .. } => "record_tab_response",
            Self::RecordHistory(_) => "record_history",
            Self::ClearHistory => "clear_history",
            Self::AddCollection { .. } => "add_collection",
            Self::RenameCollection { .. } => "rename_collection",
            Self::DeleteCollection { .. } => "delete_collection",
        }
    }
}

/// Applies `action` to `state`.
///
/// Returns `false` when the action was rejected (unknown id, blank name,
/// last tab, out-of-range index); the state is then unchanged.
pub fn reduce(state: &mut Workbench, action: Action, now: DateTime<Utc>) -> bool {
    match action {
        Action::AddTab { id } => state.add_tab(id, now),
        Action::RemoveTab { id } => state.remove_tab(&id),
        Action::UpdateTab { id, patch } => state.update_tab(&id, patch),
        Action::SetActiveTab { id } => state.set_active_tab(&id),
        Action::SetActiveSection(section) => {
            state.set_active_section(section);
            true
        }
        Action::RenameTab { id, name } => state.rename_tab(&id, &name),
        Action::EditUrl { id, url } => state.edit_tab(&id, |tab| {
            tab.edit_url(&url);
            true
        }),
        Action::SetMethod { id, method } => state.edit_tab(&id, |tab| {
            tab.method = method;
            true
        }),
        Action::SetParam {
            id,
            index,
            key,
            value,
            enabled,
        } => state.edit_tab(&id, |tab| tab.params.set_field(index, key, value, enabled)),
        Action::ToggleParam { id, index } => state.edit_tab(&id, |tab| tab.params.toggle(index)),
        Action::RemoveParam { id, index } => state.edit_tab(&id, |tab| tab.params.remove(index)),
        Action::SetHeader { id, name, value } => {
            state.edit_tab(&id, |tab| tab.headers.set(name, value))
        }
        Action::RemoveHeader { id, name } => state.edit_tab(&id, |tab| tab.headers.remove(&name)),
        Action::SetBody { id, body } => state.edit_tab(&id, |tab| {
            tab.body = body;
            true
        }),
        Action::SetAuthType { id, kind } => state.edit_tab(&id, |tab| {
            tab.auth.set_kind(kind);
            true
        }),
        Action::SetAuthField { id, key, value } => state.edit_tab(&id, |tab| {
            tab.auth.set_field(key, value);
            true
        }),
        Action::RecordResponse(response) => {
            state.record_response(response);
            true
        }
        Action::RecordTabResponse { tab_id, response } => {
            state.record_tab_response(&tab_id, response)
        }
        Action::RecordHistory(snapshot) => {
            state.record_history(snapshot);
            true
        }
        Action::ClearHistory => state.clear_history(),
        Action::AddCollection {
            id,
            name,
            parent_id,
        } => state.add_collection(id, &name, parent_id.as_deref()),
        Action::RenameCollection { id, name } => state.rename_collection(&id, &name),
        Action::DeleteCollection { id } => state.delete_collection(&id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use khabari_domain::{AuthConfig, QueryParam};
    use pretty_assertions::assert_eq;

    fn state() -> Workbench {
        Workbench::new("t1", Utc::now())
    }

    fn apply(state: &mut Workbench, action: Action) -> bool {
        reduce(state, action, Utc::now())
    }

    fn active(state: &Workbench) -> &RequestDefinition {
        match state.active_tab() {
            Some(tab) => tab,
            None => unreachable!("session always has an active tab"),
        }
    }

    #[test]
    fn url_edit_then_param_edits_stay_coherent() {
        let mut state = state();
        apply(
            &mut state,
            Action::EditUrl {
                id: "t1".into(),
                url: "https://api.test/users?page=1&q=a%20b".into(),
            },
        );
        assert_eq!(active(&state).url, "https://api.test/users");
        assert_eq!(
            active(&state).params.all(),
            &[QueryParam::new("page", "1"), QueryParam::new("q", "a b")]
        );

        assert!(apply(
            &mut state,
            Action::ToggleParam {
                id: "t1".into(),
                index: 0,
            }
        ));
        assert_eq!(active(&state).full_url(), "https://api.test/users?q=a%20b");

        assert!(apply(
            &mut state,
            Action::ToggleParam {
                id: "t1".into(),
                index: 0,
            }
        ));
        assert_eq!(
            active(&state).full_url(),
            "https://api.test/users?page=1&q=a%20b"
        );
    }

    #[test]
    fn out_of_range_param_edits_are_rejected() {
        let mut state = state();
        let before = state.clone();
        assert!(!apply(
            &mut state,
            Action::SetParam {
                id: "t1".into(),
                index: 3,
                key: "k".into(),
                value: "v".into(),
                enabled: true,
            }
        ));
        assert!(!apply(
            &mut state,
            Action::RemoveParam {
                id: "t1".into(),
                index: 0,
            }
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn edits_to_unknown_tab_are_rejected() {
        let mut state = state();
        let before = state.clone();
        for action in [
            Action::SetMethod {
                id: "ghost".into(),
                method: HttpMethod::Post,
            },
            Action::SetBody {
                id: "ghost".into(),
                body: "{}".into(),
            },
            Action::UpdateTab {
                id: "ghost".into(),
                patch: RequestPatch::default(),
            },
            Action::SetActiveTab { id: "ghost".into() },
        ] {
            assert!(!apply(&mut state, action));
        }
        assert_eq!(state, before);
    }

    #[test]
    fn auth_type_change_clears_fields() {
        let mut state = state();
        apply(
            &mut state,
            Action::SetAuthType {
                id: "t1".into(),
                kind: AuthType::Bearer,
            },
        );
        apply(
            &mut state,
            Action::SetAuthField {
                id: "t1".into(),
                key: "token".into(),
                value: "abc".into(),
            },
        );
        assert_eq!(active(&state).auth, AuthConfig::bearer("abc"));

        apply(
            &mut state,
            Action::SetAuthType {
                id: "t1".into(),
                kind: AuthType::Basic,
            },
        );
        assert_eq!(active(&state).auth.kind, AuthType::Basic);
        assert_eq!(active(&state).auth.field("token"), "");
    }

    #[test]
    fn header_edits() {
        let mut state = state();
        assert!(apply(
            &mut state,
            Action::SetHeader {
                id: "t1".into(),
                name: "X-Trace".into(),
                value: "1".into(),
            }
        ));
        assert!(!apply(
            &mut state,
            Action::SetHeader {
                id: "t1".into(),
                name: "  ".into(),
                value: "x".into(),
            }
        ));
        assert!(apply(
            &mut state,
            Action::RemoveHeader {
                id: "t1".into(),
                name: "Accept".into(),
            }
        ));
        assert_eq!(active(&state).headers.get("X-Trace"), Some("1"));
        assert_eq!(active(&state).headers.get("Accept"), None);
    }

    #[test]
    fn collection_actions() {
        let mut state = state();
        let add = Action::add_collection("Users", None);
        let Action::AddCollection { id, .. } = add.clone() else {
            unreachable!()
        };
        assert!(apply(&mut state, add));
        assert!(apply(
            &mut state,
            Action::add_collection("Admins", Some(id.clone()))
        ));
        assert!(!apply(&mut state, Action::add_collection("  ", None)));
        assert_eq!(state.collections().count(), 2);

        assert!(apply(&mut state, Action::DeleteCollection { id }));
        assert!(state.collections().is_empty());
    }

    #[test]
    fn add_tab_generates_distinct_ids() {
        let mut state = state();
        apply(&mut state, Action::add_tab());
        apply(&mut state, Action::add_tab());
        let names: Vec<_> = state.session().tabs().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["New Request", "New Request 2", "New Request 3"]);
        assert_ne!(state.session().tabs()[1].id, state.session().tabs()[2].id);
    }

    #[test]
    fn add_tab_with_open_id_is_rejected() {
        let mut state = state();
        assert!(!apply(&mut state, Action::AddTab { id: "t1".into() }));
        assert_eq!(state.session().tabs().len(), 1);
    }

    #[test]
    fn update_tab_url_is_split_into_params() {
        let mut state = state();
        apply(
            &mut state,
            Action::EditUrl {
                id: "t1".into(),
                url: "https://a.test/x?b=2".into(),
            },
        );
        assert!(apply(
            &mut state,
            Action::UpdateTab {
                id: "t1".into(),
                patch: RequestPatch {
                    url: Some("https://a.test/y?a=1".into()),
                    ..RequestPatch::default()
                },
            }
        ));
        assert_eq!(active(&state).url, "https://a.test/y");
        assert_eq!(active(&state).full_url(), "https://a.test/y?a=1");
    }
}
