//! Khabari Domain - Core workbench types
//!
//! This crate defines the state model of the Khabari HTTP workbench: tabs,
//! requests, responses, history and collections.
//! All types here are pure Rust with no I/O dependencies.

pub mod collection;
pub mod error;
pub mod export;
pub mod history;
pub mod id;
pub mod request;
pub mod response;
pub mod session;
pub mod workbench;

pub use collection::{CollectionItem, CollectionTree, ItemKind};
pub use error::{DomainError, DomainResult};
pub use export::ExportView;
pub use history::{HISTORY_LIMIT, RequestHistory, time_ago};
pub use id::generate_id;
pub use request::{
    AuthConfig, AuthType, Credentials, Headers, HttpMethod, QueryParam, QueryParams,
    RequestDefinition, RequestPatch,
};
pub use response::{ResponseCache, ResponseRecord, TableView, format_size};
pub use session::{Closed, SEED_TAB_NAME, Section, TabSession};
pub use workbench::Workbench;
