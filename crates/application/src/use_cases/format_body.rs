//! Format body use case.

use crate::ApplicationResult;
use crate::ports::{BodyFormatter, StateSink};
use crate::store::{Action, WorkbenchStore};

/// Use case for pretty-printing the active tab's body in place.
///
/// A blank or unparseable body is left untouched, as is one that is already
/// formatted.
pub struct FormatBody<F: BodyFormatter> {
    formatter: F,
}

impl<F: BodyFormatter> FormatBody<F> {
    /// Creates a new `FormatBody` use case.
    #[must_use]
    pub const fn new(formatter: F) -> Self {
        Self { formatter }
    }

    /// Formats the active tab's body.
    ///
    /// Returns whether the body changed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store fails to persist the change.
    pub async fn execute<S: StateSink>(
        &self,
        store: &mut WorkbenchStore<S>,
    ) -> ApplicationResult<bool> {
        let Some(tab) = store.state().active_tab() else {
            return Ok(false);
        };
        let Some(formatted) = self.formatter.format(&tab.body) else {
            return Ok(false);
        };
        if formatted == tab.body {
            return Ok(false);
        }

        let id = tab.id.clone();
        store.dispatch(Action::SetBody { id, body: formatted }).await
    }
}
