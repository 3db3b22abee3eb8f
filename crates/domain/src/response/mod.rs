//! Response records, the per-tab response cache and derived views

mod cache;
mod record;
mod table;

pub use cache::ResponseCache;
pub use record::{ResponseRecord, format_size};
pub use table::TableView;
