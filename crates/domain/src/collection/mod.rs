//! Collection tree for organizing saved requests

mod item;
mod tree;

pub use item::{CollectionItem, ItemKind};
pub use tree::CollectionTree;
