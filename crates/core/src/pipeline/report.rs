//! Walk results.

use std::collections::BTreeMap;
use std::fmt;

use uuid::Uuid;

/// Root-stripped path → file record identifier.
pub type PathIdentifierMap = BTreeMap<String, Uuid>;

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Uploaded and recorded.
    Recorded {
        /// Root-stripped path.
        map_key: String,
        /// Generated identifier.
        id: Uuid,
    },
    /// Upload failed; no record was attempted.
    UploadFailed,
    /// Name is not valid UTF-8; nothing was uploaded.
    NonUtf8Name,
    /// Uploaded, but no record exists for the object.
    RecordFailed,
}

/// Accumulated result of one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkReport {
    /// Files that were uploaded and recorded.
    pub files: PathIdentifierMap,
    /// Non-directory entries visited.
    pub files_seen: usize,
    /// Successful uploads, including those whose record failed.
    pub uploaded: usize,
    /// Failed uploads.
    pub upload_failures: usize,
    /// Uploads left without a record.
    pub record_failures: usize,
    /// Entries skipped because their path is not valid UTF-8.
    pub non_utf8_names: usize,
}

impl WalkReport {
    /// Fold one outcome into the report.
    #[must_use]
    pub fn with_outcome(mut self, outcome: FileOutcome) -> Self {
        self.files_seen += 1;
        match outcome {
            FileOutcome::Recorded { map_key, id } => {
                self.uploaded += 1;
                self.files.insert(map_key, id);
            }
            FileOutcome::UploadFailed => self.upload_failures += 1,
            FileOutcome::NonUtf8Name => self.non_utf8_names += 1,
            FileOutcome::RecordFailed => {
                self.uploaded += 1;
                self.record_failures += 1;
            }
        }
        self
    }

    /// Number of recorded files.
    #[must_use]
    pub fn recorded(&self) -> usize {
        self.files.len()
    }
}

/// Renders the console report: a header, then `path id` per line.
impl fmt::Display for WalkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File name and ID:")?;
        for (path, id) in &self.files {
            writeln!(f, "{path} {id}")?;
        }
        Ok(())
    }
}
