//! JSON body formatter adapter

use khabari_application::ports::BodyFormatter;

use crate::serialization::format_json;

/// Formats request bodies as 2-space indented JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBodyFormatter;

impl BodyFormatter for JsonBodyFormatter {
    fn format(&self, text: &str) -> Option<String> {
        format_json(text)
    }
}
