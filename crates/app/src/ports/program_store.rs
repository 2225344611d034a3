//! Program store port — persistence for the automation schedule.

use std::future::Future;

use growbox_domain::error::GrowboxError;
use growbox_domain::program::Program;

/// Loads the persisted program document.
///
/// The store only reports what it found; the cycle driver applies the
/// built-in-default fallback when loading fails, so that policy lives in
/// the core where it is testable.
pub trait ProgramStore {
    /// Load and parse the current program.
    fn load(&self) -> impl Future<Output = Result<Program, GrowboxError>> + Send;
}
