//! File record error types.

use thiserror::Error;

/// File record operation errors.
#[derive(Debug, Error)]
pub enum RecordError {
    /// URL violates the column constraints.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Store used before `connect` succeeded.
    #[error("record store is not connected")]
    NotConnected,

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl RecordError {
    /// Create an invalid URL error.
    #[must_use]
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
