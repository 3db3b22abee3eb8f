//! Khabari terminal front end.
//!
//! Parses commands, applies them to the persisted workbench and renders the
//! result as plain text.

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;

pub use cli::{Cli, Command, ShowView};
pub use commands::App;
pub use error::{AppError, AppResult};
