//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod body_formatter;
mod clock;
mod dispatcher;
mod export_writer;
mod state_sink;

pub use body_formatter::BodyFormatter;
pub use clock::Clock;
pub use dispatcher::{DispatchError, Dispatcher};
pub use export_writer::{ExportError, ExportWriter};
pub use state_sink::{StateSink, StorageError};
