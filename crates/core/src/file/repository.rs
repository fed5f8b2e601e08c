//! Persistence seam for file records.

use std::future::Future;

use super::error::RecordError;
use super::types::{FileRecord, NewFileRecord};

/// Repository trait for file record persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait FileRecordRepository: Send + Sync {
    /// Insert a new record and return it with its generated identifier.
    fn create(
        &self,
        input: NewFileRecord,
    ) -> impl Future<Output = Result<FileRecord, RecordError>> + Send;
}
