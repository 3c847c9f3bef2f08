//! Error types for evaluation sets and clipboard access.
//!
//! `ClipboardError` is defined here rather than in `promptgrade-platform` so
//! the copy action can log the cause of a failure without depending on any
//! particular backend.

use thiserror::Error;

/// Errors raised while building an evaluation set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetError {
    /// Two items share the same id.
    #[error("duplicate item id: {0}")]
    DuplicateId(u32),

    /// Item ids must be positive.
    #[error("item id must be positive, got 0")]
    ZeroId,
}

/// Errors that can occur when writing to the clipboard.
///
/// Every variant collapses to the same "copy failed" outcome for the user.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard backend is available on this system.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The platform refused the write.
    #[error("clipboard access denied: {0}")]
    Denied(String),

    /// The write did not complete in time.
    #[error("clipboard write timed out after {0}ms")]
    Timeout(u64),

    /// Any other I/O failure talking to the clipboard service.
    #[error("clipboard transport error: {0}")]
    Transport(String),
}
