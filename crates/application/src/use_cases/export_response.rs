//! Export response use case.

use std::path::PathBuf;
use std::sync::Arc;

use khabari_domain::{ExportView, Workbench};
use tracing::info;

use crate::ports::{Clock, ExportError, ExportWriter};
use crate::{ApplicationError, ApplicationResult};

/// Use case for saving the displayed response to a file.
pub struct ExportResponse<W: ExportWriter> {
    writer: Arc<W>,
    clock: Arc<dyn Clock>,
}

impl<W: ExportWriter> ExportResponse<W> {
    /// Creates a new `ExportResponse` use case.
    #[must_use]
    pub fn new(writer: Arc<W>, clock: Arc<dyn Clock>) -> Self {
        Self { writer, clock }
    }

    /// Writes `view` of the displayed response as
    /// `response-<view>-<timestamp>.json`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no response is displayed, or an export error
    /// if the file cannot be written.
    pub async fn execute(&self, state: &Workbench, view: ExportView) -> ApplicationResult<PathBuf> {
        let response = state
            .response()
            .ok_or_else(|| ApplicationError::NotFound("no response to export".into()))?;

        let content = view
            .content(response)
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
        let file_name = view.file_name(self.clock.now());

        let path = self.writer.write(&file_name, &content).await?;
        info!(path = %path.display(), view = %view, "response exported");
        Ok(path)
    }
}
