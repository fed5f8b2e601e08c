//! Upload pipeline implementation.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};
use walkdir::WalkDir;

use super::error::PipelineError;
use super::keys::{KeyError, derive_keys};
use super::report::{FileOutcome, WalkReport};
use crate::file::{FileRecordRepository, NewFileRecord};
use crate::storage::ObjectStore;

/// Walks a directory, uploading and recording every file.
pub struct UploadPipeline<S: ObjectStore, R: FileRecordRepository> {
    storage: Arc<S>,
    repo: Arc<R>,
}

impl<S: ObjectStore, R: FileRecordRepository> UploadPipeline<S, R> {
    /// Create a new upload pipeline.
    #[must_use]
    pub fn new(storage: Arc<S>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// Walk `root` recursively and process every non-directory entry in order.
    ///
    /// Symlinks are not followed; a symlink entry is uploaded like a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not valid UTF-8 or the traversal itself
    /// fails, e.g. the root does not exist or a directory cannot be read.
    /// Per-file failures are logged and counted in the report instead.
    pub async fn run(&self, root: &Path) -> Result<WalkReport, PipelineError> {
        info!(root = %root.display(), "Walking source directory");
        root_str(root)?;

        let mut report = WalkReport::default();
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            let outcome = self.process_file(root, entry.path()).await?;
            report = report.with_outcome(outcome);
        }

        info!(
            files = report.files_seen,
            uploaded = report.uploaded,
            recorded = report.recorded(),
            upload_failures = report.upload_failures,
            record_failures = report.record_failures,
            non_utf8_names = report.non_utf8_names,
            "Walk finished"
        );

        Ok(report)
    }

    /// Upload one file, then record it.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not valid UTF-8 or `path` is not under
    /// `root`. A non-UTF-8 `path` is skipped without uploading.
    pub async fn process_file(
        &self,
        root: &Path,
        path: &Path,
    ) -> Result<FileOutcome, PipelineError> {
        let keys = match derive_keys(root_str(root)?, path) {
            Ok(keys) => keys,
            Err(KeyError::NonUtf8) => {
                warn!(path = %path.display(), "Skipping file with non-UTF-8 name");
                return Ok(FileOutcome::NonUtf8Name);
            }
            Err(KeyError::OutsideRoot) => {
                return Err(PipelineError::OutsideRoot {
                    path: path.to_path_buf(),
                    root: root.to_path_buf(),
                });
            }
        };

        let uploaded = match self.storage.upload(path, &keys.storage_key).await {
            Ok(uploaded) => {
                info!(
                    path = %path.display(),
                    url = %uploaded.url,
                    content_type = uploaded.content_type,
                    size = uploaded.size,
                    "Uploaded file"
                );
                uploaded
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to upload file");
                return Ok(FileOutcome::UploadFailed);
            }
        };

        let record = NewFileRecord::confirmed(uploaded.url.clone());
        let created = match record.validate() {
            Ok(()) => self.repo.create(record).await,
            Err(e) => Err(e),
        };

        match created {
            Ok(file) => Ok(FileOutcome::Recorded {
                map_key: keys.map_key,
                id: file.id,
            }),
            Err(e) => {
                // The object stays in the bucket without a row.
                error!(
                    path = %path.display(),
                    url = %uploaded.url,
                    error = %e,
                    "Failed to record uploaded file"
                );
                Ok(FileOutcome::RecordFailed)
            }
        }
    }
}

fn root_str(root: &Path) -> Result<&str, PipelineError> {
    root.to_str().ok_or_else(|| PipelineError::NonUtf8Root {
        root: root.to_path_buf(),
    })
}
