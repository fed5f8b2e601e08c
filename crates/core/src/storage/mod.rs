//! Object storage client using Apache OpenDAL.
//!
//! Files are uploaded to an S3-compatible bucket (or a local directory during
//! development) and addressed by a public URL of the form
//! `<endpoint>/<bucket>/<key>`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                              │
//! │                   (Unified Storage API)                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.write_with("key", bytes).content_type(sniffed)               │
//! │ op.stat("key")                                                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;
pub mod sniff;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{ObjectMetadata, ObjectStore, StorageService, UploadedObject};
pub use sniff::detect_content_type;
