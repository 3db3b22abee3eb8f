//! Khabari Application - Use cases and ports
//!
//! This crate contains the workbench store, the use cases that drive it and
//! the ports its adapters implement. It depends only on the domain crate.

pub mod error;
pub mod ports;
pub mod store;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use store::{Action, PendingSend, WorkbenchStore, reduce};
pub use use_cases::{ExportResponse, FormatBody, SendRequest, SendRequestError};
