//! Deterministic JSON for the persisted workbench and exports.
//!
//! - Object keys keep the order of the source types (`BTreeMap` fields are
//!   sorted)
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 without BOM

mod json;

pub use json::*;
