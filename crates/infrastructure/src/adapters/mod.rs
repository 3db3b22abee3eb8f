//! Port adapters

mod json_formatter;
mod reqwest_dispatcher;
mod system_clock;

pub use json_formatter::JsonBodyFormatter;
pub use reqwest_dispatcher::ReqwestDispatcher;
pub use system_clock::SystemClock;
