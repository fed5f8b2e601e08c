//! File records: one row per uploaded object.

mod error;
mod repository;
mod types;

pub use error::RecordError;
pub use repository::FileRecordRepository;
pub use types::{FileRecord, MAX_URL_LENGTH, NewFileRecord};
