//! File record types and data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::RecordError;

/// Maximum URL length accepted by the `files.url` column.
pub const MAX_URL_LENGTH: usize = 2000;

/// Input for creating a file record.
///
/// The identifier is generated by the database, so it is absent here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFileRecord {
    /// Public URL of the uploaded object.
    pub url: String,
    /// Confirmation flag.
    pub is_confirmed: bool,
}

impl NewFileRecord {
    /// Record for a freshly uploaded object; always confirmed.
    #[must_use]
    pub fn confirmed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_confirmed: true,
        }
    }

    /// Check the URL against the column constraints.
    ///
    /// Over-length URLs are rejected, never truncated.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidUrl`] for empty or over-length URLs.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.url.trim().is_empty() {
            return Err(RecordError::invalid_url("url is empty"));
        }
        let len = self.url.chars().count();
        if len > MAX_URL_LENGTH {
            return Err(RecordError::invalid_url(format!(
                "url is {len} characters, maximum is {MAX_URL_LENGTH}"
            )));
        }
        Ok(())
    }
}

/// File record domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Database-generated identifier.
    pub id: Uuid,
    /// Public URL of the uploaded object.
    pub url: String,
    /// Confirmation flag.
    pub is_confirmed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}
