//! Core logic for Stowage.
//!
//! This crate contains the upload pipeline with ZERO database dependencies.
//! Persistence is reached through the [`file::FileRecordRepository`] trait,
//! implemented by the db crate.
//!
//! # Modules
//!
//! - `storage` - Object storage client (OpenDAL) and content-type sniffing
//! - `file` - File record types and the repository seam
//! - `pipeline` - Directory walk driving upload then record per file

pub mod file;
pub mod pipeline;
pub mod storage;
