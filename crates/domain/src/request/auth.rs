//! Authorization settings for a request.
//!
//! Stored as `{type, config}` where `config` is a loose string map; the keys
//! that matter depend on `type`. [`AuthConfig::credentials`] gives the typed
//! view used when a request is sent.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Kind of authorization applied to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AuthType {
    /// No authorization
    #[default]
    None,
    /// HTTP basic authentication (`username`, `password`)
    Basic,
    /// Bearer token (`token`)
    Bearer,
    /// Arbitrary header carrying a key (`key`, `value`)
    ApiKey,
}

impl AuthType {
    /// Returns the persisted name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic => "basic",
            Self::Bearer => "bearer",
            Self::ApiKey => "apiKey",
        }
    }

    /// Returns the config keys this type reads.
    #[must_use]
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::None => &[],
            Self::Basic => &["username", "password"],
            Self::Bearer => &["token"],
            Self::ApiKey => &["key", "value"],
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "basic" => Ok(Self::Basic),
            "bearer" => Ok(Self::Bearer),
            "apikey" | "api-key" | "api_key" => Ok(Self::ApiKey),
            _ => Err(DomainError::UnknownAuthType(s.to_string())),
        }
    }
}

/// Authorization settings as edited in the auth section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Selected authorization kind
    #[serde(rename = "type")]
    pub kind: AuthType,
    /// Field values for the selected kind
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// Typed credentials derived from an [`AuthConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Nothing to apply.
    None,
    /// HTTP basic authentication.
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },
    /// `Authorization: Bearer <token>`.
    Bearer {
        /// The token
        token: String,
    },
    /// A custom header `key: value`.
    ApiKey {
        /// Header name
        key: String,
        /// Header value
        value: String,
    },
}

impl AuthConfig {
    /// Creates basic auth settings.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            kind: AuthType::Basic,
            config: BTreeMap::from([
                ("username".to_string(), username.into()),
                ("password".to_string(), password.into()),
            ]),
        }
    }

    /// Creates bearer token settings.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            kind: AuthType::Bearer,
            config: BTreeMap::from([("token".to_string(), token.into())]),
        }
    }

    /// Creates API key settings.
    #[must_use]
    pub fn api_key(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: AuthType::ApiKey,
            config: BTreeMap::from([
                ("key".to_string(), key.into()),
                ("value".to_string(), value.into()),
            ]),
        }
    }

    /// Switches the kind. The field map is cleared, even when the kind is
    /// unchanged.
    pub fn set_kind(&mut self, kind: AuthType) {
        self.kind = kind;
        self.config.clear();
    }

    /// Sets one field of the config map.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.config.insert(key.into(), value.into());
    }

    /// Returns a field value, or `""` when unset.
    #[must_use]
    pub fn field(&self, key: &str) -> &str {
        self.config.get(key).map_or("", String::as_str)
    }

    /// Derives the credentials to apply to an outgoing request.
    ///
    /// Returns [`Credentials::None`] when the identifying field (username,
    /// token or key name) is empty.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        match self.kind {
            AuthType::None => Credentials::None,
            AuthType::Basic if !self.field("username").is_empty() => Credentials::Basic {
                username: self.field("username").to_string(),
                password: self.field("password").to_string(),
            },
            AuthType::Bearer if !self.field("token").is_empty() => Credentials::Bearer {
                token: self.field("token").to_string(),
            },
            AuthType::ApiKey if !self.field("key").is_empty() => Credentials::ApiKey {
                key: self.field("key").to_string(),
                value: self.field("value").to_string(),
            },
            _ => Credentials::None,
        }
    }
}
