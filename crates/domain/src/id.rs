//! ID generation utilities.

use uuid::Uuid;

/// Generates a new UUID v7 as a string.
///
/// UUID v7 is time-ordered, so ids generated in sequence never collide and
/// sort in creation order. This is the id format for tabs and tree nodes.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}
