//! Shared configuration and error types for Stowage.
//!
//! This crate provides the pieces every binary needs before the pipeline runs:
//! - Typed application configuration loaded from files and environment
//! - Process-level error types with exit codes

pub mod config;
pub mod error;

pub use config::{AppConfig, DatabaseConfig, SourceConfig, StorageSettings};
pub use error::{AppError, AppResult};
