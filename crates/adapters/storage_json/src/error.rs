//! Storage-specific error type wrapping filesystem and parse errors.

use growbox_domain::error::{GrowboxError, ProgramError};

/// Errors originating from the JSON program store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading the document file failed.
    #[error("failed to read program document")]
    Io(#[from] std::io::Error),

    /// The document content did not parse.
    #[error("failed to parse program document")]
    Parse(#[from] ProgramError),
}

impl From<StorageError> for GrowboxError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
