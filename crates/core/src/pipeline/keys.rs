//! Storage and report keys for a walked entry.
//!
//! Both keys come from the same root-relative suffix but differ in whether the
//! root prefix is kept:
//!
//! ```text
//! root  = /srv/upload
//! entry = /srv/upload/a/b.txt
//!
//! storage key = /srv/upload/a/b.txt   (root kept verbatim)
//! map key     = /a/b.txt              (root stripped)
//! ```

use std::path::Path;

/// Keys derived for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryKeys {
    /// Object key in the bucket.
    pub storage_key: String,
    /// Key in the path → identifier report.
    pub map_key: String,
}

/// Why no keys could be derived for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    /// The entry path is not valid UTF-8.
    NonUtf8,
    /// The entry path does not start with the root.
    OutsideRoot,
}

/// Derive both keys for `path` found under `root`.
///
/// Paths are never converted lossily: two distinct non-UTF-8 names would
/// otherwise collapse onto the same key.
///
/// # Errors
///
/// Returns [`KeyError::NonUtf8`] if `path` is not valid UTF-8 and
/// [`KeyError::OutsideRoot`] if it does not start with `root`.
pub fn derive_keys(root: &str, path: &Path) -> Result<EntryKeys, KeyError> {
    let path = path.to_str().ok_or(KeyError::NonUtf8)?;
    let suffix = path.strip_prefix(root).ok_or(KeyError::OutsideRoot)?;

    Ok(EntryKeys {
        storage_key: format!("{root}{suffix}"),
        map_key: suffix.to_string(),
    })
}
