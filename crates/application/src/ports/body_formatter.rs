//! Body formatter port

/// Pretty-prints a request body.
pub trait BodyFormatter: Send + Sync {
    /// Returns the formatted text, or `None` when `text` is blank or not
    /// something this formatter understands.
    fn format(&self, text: &str) -> Option<String>;
}
