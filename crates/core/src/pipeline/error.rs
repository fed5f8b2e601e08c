//! Pipeline error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a walk.
///
/// Upload and record failures are per-file and never show up here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Directory traversal failed.
    #[error("error walking directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The root is not valid UTF-8, so no key could be derived from it.
    #[error("root {} is not valid UTF-8", root.display())]
    NonUtf8Root {
        /// Walk root.
        root: PathBuf,
    },

    /// Traversal yielded a path outside the root.
    #[error("entry {} is outside root {}", path.display(), root.display())]
    OutsideRoot {
        /// Offending entry.
        path: PathBuf,
        /// Walk root.
        root: PathBuf,
    },
}
