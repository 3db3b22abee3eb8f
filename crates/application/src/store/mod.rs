//! Reducer-style state container for the workbench.
//!
//! [`reduce`] is the pure transition function; [`WorkbenchStore`] wraps it
//! with persistence, logging and in-flight send tracking.

mod action;
mod workbench_store;

pub use action::{Action, reduce};
pub use workbench_store::{PendingSend, WorkbenchStore};

#[cfg(test)]
pub(crate) use workbench_store::tests as testing;
