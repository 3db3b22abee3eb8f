//! Khabari Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod persistence;
pub mod serialization;
pub mod settings;

pub use adapters::{JsonBodyFormatter, ReqwestDispatcher, SystemClock};
pub use persistence::{FileExportWriter, FileStateRepository, STORAGE_FILE};
pub use serialization::{
    SerializationError, format_json, from_json_bytes, to_json_stable, to_json_stable_bytes,
};
pub use settings::{AppConfig, ConfigError};
