//! Application use cases (business logic orchestration).

mod export_response;
mod format_body;
mod send_request;

pub use export_response::*;
pub use format_body::*;
pub use send_request::*;
