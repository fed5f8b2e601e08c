//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Startup and run errors that end the process.
///
/// Per-file upload and record failures never surface here; they are logged by
/// the pipeline and the walk continues.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database connection failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Schema migration failed.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Object storage client could not be set up.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Directory walk could not proceed.
    #[error("Walk error: {0}")]
    Walk(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,
            Self::Database(_) | Self::Migration(_) | Self::Storage(_) | Self::Walk(_) => 1,
        }
    }

    /// Returns a short machine-readable code for log lines.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Migration(_) => "MIGRATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Walk(_) => "WALK_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_non_zero() {
        let errors = [
            AppError::Config(String::new()),
            AppError::Database(String::new()),
            AppError::Migration(String::new()),
            AppError::Storage(String::new()),
            AppError::Walk(String::new()),
        ];
        for err in errors {
            assert_ne!(err.exit_code(), 0, "{err:?} must not exit cleanly");
        }
        assert_eq!(AppError::Config(String::new()).exit_code(), 78);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Config(String::new()).error_code(), "CONFIG_ERROR");
        assert_eq!(
            AppError::Database(String::new()).error_code(),
            "DATABASE_ERROR"
        );
        assert_eq!(
            AppError::Migration(String::new()).error_code(),
            "MIGRATION_ERROR"
        );
        assert_eq!(AppError::Storage(String::new()).error_code(), "STORAGE_ERROR");
        assert_eq!(AppError::Walk(String::new()).error_code(), "WALK_ERROR");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Database("refused".into()).to_string(),
            "Database error: refused"
        );
        assert_eq!(
            AppError::Walk("no such directory".into()).to_string(),
            "Walk error: no such directory"
        );
    }

    #[test]
    fn test_from_config_error() {
        let err: AppError = config::ConfigError::NotFound("storage.bucket".into()).into();
        assert!(matches!(err, AppError::Config(_)));
    }
}
