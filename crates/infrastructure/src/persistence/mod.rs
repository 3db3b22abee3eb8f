//! File-backed persistence adapters.

mod export_writer;
mod state_repository;

pub use export_writer::FileExportWriter;
pub use state_repository::{FileStateRepository, STORAGE_FILE};
