//! The request held by a tab and by history entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuthConfig, Headers, HttpMethod, QueryParams};

/// A complete, editable request.
///
/// `url` never carries a query string: the query lives in `params`, and
/// [`RequestDefinition::full_url`] joins the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDefinition {
    /// Identifier, stable for the tab's lifetime
    pub id: String,
    /// Display label
    pub name: String,
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// Base URL without query string
    #[serde(default)]
    pub url: String,
    /// Query parameter rows
    #[serde(default)]
    pub params: QueryParams,
    /// Header map
    #[serde(default)]
    pub headers: Headers,
    /// Raw body text
    #[serde(default)]
    pub body: String,
    /// Authorization settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Creation time, or execution time for history snapshots
    pub timestamp: DateTime<Utc>,
}

impl RequestDefinition {
    /// Creates a request with the default field values: GET, empty URL and
    /// body, JSON `Accept`/`Content-Type` headers, no auth.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            method: HttpMethod::default(),
            url: String::new(),
            params: QueryParams::new(),
            headers: Headers::defaults(),
            body: String::new(),
            auth: AuthConfig::default(),
            timestamp,
        }
    }

    /// The URL as shown to the user and sent on the wire.
    #[must_use]
    pub fn full_url(&self) -> String {
        self.params.rebuild(&self.url)
    }

    /// Applies text typed into the URL field.
    ///
    /// The typed text wins: its query string replaces the parameter list
    /// outright, including any disabled rows.
    pub fn edit_url(&mut self, input: &str) {
        let (base, params) = QueryParams::parse(input);
        self.url = base;
        self.params = params;
    }

    /// True when the body should be attached to the outgoing request.
    #[must_use]
    pub fn sends_body(&self) -> bool {
        self.method.allows_body() && !self.body.trim().is_empty()
    }

    /// Returns a detached copy stamped with `executed_at`.
    #[must_use]
    pub fn snapshot(&self, executed_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: executed_at,
            ..self.clone()
        }
    }
}

/// A shallow, partial update for a [`RequestDefinition`].
///
/// Fields left as `None` are untouched. The id and timestamp cannot be
/// patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPatch {
    /// New display label
    pub name: Option<String>,
    /// New method
    pub method: Option<HttpMethod>,
    /// New URL. Its query string replaces the parameter list unless
    /// `params` is also given, in which case the query is dropped.
    pub url: Option<String>,
    /// Replacement parameter list
    pub params: Option<QueryParams>,
    /// Replacement header map
    pub headers: Option<Headers>,
    /// Replacement body
    pub body: Option<String>,
    /// Replacement auth settings
    pub auth: Option<AuthConfig>,
}

impl RequestPatch {
    /// Merges the present fields into `target`.
    pub fn apply(self, target: &mut RequestDefinition) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(method) = self.method {
            target.method = method;
        }
        let params = match self.url {
            Some(url) => {
                let (base, parsed) = QueryParams::parse(&url);
                target.url = base;
                Some(self.params.unwrap_or(parsed))
            }
            None => self.params,
        };
        if let Some(params) = params {
            target.params = params;
        }
        if let Some(headers) = self.headers {
            target.headers = headers;
        }
        if let Some(body) = self.body {
            target.body = body;
        }
        if let Some(auth) = self.auth {
            target.auth = auth;
        }
    }

    /// True when the patch carries no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request::{AuthType, QueryParam};
    use pretty_assertions::assert_eq;

    fn request() -> RequestDefinition {
        RequestDefinition::new("t1", "New Request", Utc::now())
    }

    #[test]
    fn new_request_has_defaults() {
        let req = request();
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.url.is_empty());
        assert!(req.body.is_empty());
        assert_eq!(req.headers, Headers::defaults());
        assert_eq!(req.auth.kind, AuthType::None);
    }

    #[test]
    fn edit_url_replaces_params() {
        let mut req = request();
        req.params.add(QueryParam::disabled("keep", "me"));

        req.edit_url("https://api.test/items?page=3&sort=asc");

        assert_eq!(req.url, "https://api.test/items");
        assert_eq!(
            req.params.all(),
            &[QueryParam::new("page", "3"), QueryParam::new("sort", "asc")]
        );
        assert_eq!(req.full_url(), "https://api.test/items?page=3&sort=asc");
    }

    #[test]
    fn full_url_reflects_param_edits() {
        let mut req = request();
        req.edit_url("https://api.test/items?page=3");
        req.params.set_field(1, "limit", "20", true);
        req.params.toggle(0);
        assert_eq!(req.full_url(), "https://api.test/items?limit=20");
    }

    #[test]
    fn body_is_only_sent_for_body_methods() {
        let mut req = request();
        req.body = "{\"a\":1}".into();
        assert!(!req.sends_body());
        req.method = HttpMethod::Patch;
        assert!(req.sends_body());
        req.body = "   ".into();
        assert!(!req.sends_body());
    }

    #[test]
    fn patch_merges_present_fields_only() {
        let mut req = request();
        RequestPatch {
            method: Some(HttpMethod::Post),
            body: Some("{}".into()),
            ..RequestPatch::default()
        }
        .apply(&mut req);

        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.body, "{}");
        assert_eq!(req.name, "New Request");
        assert!(RequestPatch::default().is_empty());
    }

    #[test]
    fn patched_url_keeps_query_out_of_base() {
        let mut req = request();
        req.edit_url("https://a.test/x?b=2");

        RequestPatch {
            url: Some("https://a.test/y?a=1".into()),
            ..RequestPatch::default()
        }
        .apply(&mut req);

        assert_eq!(req.url, "https://a.test/y");
        assert_eq!(req.params.all(), &[QueryParam::new("a", "1")]);
        assert_eq!(req.full_url(), "https://a.test/y?a=1");
    }

    #[test]
    fn patched_params_win_over_url_query() {
        let mut req = request();
        let mut params = QueryParams::new();
        params.add(QueryParam::new("page", "4"));

        RequestPatch {
            url: Some("https://a.test/y?a=1".into()),
            params: Some(params),
            ..RequestPatch::default()
        }
        .apply(&mut req);

        assert_eq!(req.url, "https://a.test/y");
        assert_eq!(req.full_url(), "https://a.test/y?page=4");
    }

    #[test]
    fn snapshot_is_detached() {
        let mut req = request();
        let later = req.timestamp + chrono::Duration::seconds(5);
        let snap = req.snapshot(later);
        req.name = "Edited".into();
        assert_eq!(snap.name, "New Request");
        assert_eq!(snap.timestamp, later);
    }

    #[test]
    fn serializes_camel_case_fields() {
        let json = serde_json::to_value(request()).unwrap();
        assert!(json.get("timestamp").is_some());
        assert_eq!(json["auth"]["type"], "none");
        assert_eq!(json["method"], "GET");
    }
}
