//! Directory upload pipeline.
//!
//! For every file under the root:
//!
//! ```text
//! walk ──▶ upload (ObjectStore) ──▶ create record (FileRecordRepository) ──▶ report
//!             │ fails                    │ fails
//!             ▼                          ▼
//!        log + skip                 log + skip (object is orphaned)
//! ```
//!
//! Only a traversal failure stops the walk.

mod error;
pub mod keys;
mod report;
mod service;


pub use error::PipelineError;
pub use keys::{EntryKeys, KeyError, derive_keys};
pub use report::{FileOutcome, PathIdentifierMap, WalkReport};
pub use service::UploadPipeline;
