//! Session store errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised inside the store.
///
/// These never cross the [`SessionHandler`](crate::SessionHandler) boundary,
/// which folds them into `false` or `None`.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Refused to persist an empty payload.
    #[error("Refusing to write empty payload for session: {0}")]
    EmptyPayload(String),

    /// No file for the session.
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Failed to create the save directory.
    #[error("Failed to create save directory at {path}: {reason}")]
    CreateDirFailed { path: PathBuf, reason: String },
}
