//! # growbox-adapter-storage-json
//!
//! Filesystem persistence adapter for the program document.
//!
//! ## Responsibilities
//! - Implement the `ProgramStore` port defined in `growbox-app::ports`
//! - Read `program.json`, parse it into the typed domain model, and report
//!   per-rule skip diagnostics
//! - Surface read/parse failures as errors; the *fallback* to the built-in
//!   default program is the cycle driver's contract, not this adapter's
//!
//! ## Dependency rule
//! Depends on `growbox-app` (for port traits) and `growbox-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

mod error;

pub use error::StorageError;

use std::future::Future;
use std::path::PathBuf;

use growbox_app::ports::ProgramStore;
use growbox_domain::error::GrowboxError;
use growbox_domain::program::Program;

/// Loads the program document from a JSON file.
pub struct JsonProgramStore {
    path: PathBuf,
}

impl JsonProgramStore {
    /// Create a store reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_sync(&self) -> Result<Program, StorageError> {
        let raw = std::fs::read_to_string(&self.path).map_err(StorageError::Io)?;
        let parsed = Program::parse(&raw).map_err(StorageError::Parse)?;
        for skipped in &parsed.skipped {
            tracing::warn!(
                path = %self.path.display(),
                index = skipped.index,
                reason = %skipped.reason,
                "skipping malformed rule in program document"
            );
        }
        Ok(parsed.program)
    }
}

impl ProgramStore for JsonProgramStore {
    fn load(&self) -> impl Future<Output = Result<Program, GrowboxError>> + Send {
        // The document is config-sized and read once per (re)load, so a
        // blocking read inside the async boundary is acceptable.
        let result = self.load_sync().map_err(GrowboxError::from);
        async { result }
    }
}
