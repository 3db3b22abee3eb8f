//! Application configuration.
//!
//! Values are layered, later sources winning:
//! 1. Built-in defaults
//! 2. `khabari.toml` in the platform config directory, if present
//! 3. `KHABARI_*` environment variables (e.g. `KHABARI_REQUEST_TIMEOUT_MS`)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

/// Name of the application directory under the platform config directory.
pub const APP_DIR: &str = "khabari";

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "khabari.toml";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or a value has the wrong type.
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Runtime settings for the workbench.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Directory holding the persisted workbench; defaults to the platform
    /// config directory.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    /// Per-request timeout.
    pub request_timeout_ms: u64,
    /// Redirects followed before giving up.
    pub max_redirects: usize,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Default tracing filter, overridden by `RUST_LOG`.
    pub log_filter: String,
    /// Directory exports are written to.
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            request_timeout_ms: 30_000,
            max_redirects: 10,
            user_agent: default_user_agent(),
            log_filter: "warn".to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

fn default_user_agent() -> String {
    format!("Khabari/{}", env!("CARGO_PKG_VERSION"))
}

impl AppConfig {
    /// Returns the application config directory, e.g. `~/.config/khabari`.
    #[must_use]
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR))
    }

    /// Loads configuration from the default file location and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or a value has the wrong
    /// type.
    pub fn load() -> Result<Self, ConfigError> {
        let file = Self::config_dir().map(|dir| dir.join(CONFIG_FILE));
        Self::load_from(file.as_deref(), Environment::with_prefix("KHABARI"))
    }

    /// Loads configuration from an explicit file and environment source.
    ///
    /// A missing file is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or a value has the wrong
    /// type.
    pub fn load_from(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("request_timeout_ms", i64::try_from(defaults.request_timeout_ms).unwrap_or(i64::MAX))?
            .set_default("max_redirects", i64::try_from(defaults.max_redirects).unwrap_or(i64::MAX))?
            .set_default("user_agent", defaults.user_agent)?
            .set_default("log_filter", defaults.log_filter)?
            .set_default("export_dir", defaults.export_dir.to_string_lossy().into_owned())?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let config = builder.add_source(env.try_parsing(true)).build()?;
        Ok(config.try_deserialize()?)
    }

    /// Directory the workbench blob lives in.
    #[must_use]
    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir.clone().or_else(Self::config_dir)
    }
}
