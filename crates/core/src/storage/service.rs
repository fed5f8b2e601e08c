//! Storage service implementation using Apache OpenDAL.

use std::future::Future;
use std::path::Path;

use opendal::{Operator, services};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;
use super::sniff::detect_content_type;

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    /// Normalized key the object was written under.
    pub key: String,
    /// Public URL of the object.
    pub url: String,
    /// Detected content type.
    pub content_type: &'static str,
    /// Object size in bytes.
    pub size: u64,
}

/// Metadata about a stored object.
#[derive(Debug, Clone)]
pub struct ObjectMetadata {
    /// Storage key.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// Content type, when the provider records one.
    pub content_type: Option<String>,
}

/// Destination for uploaded files.
///
/// Implemented by [`StorageService`]; the pipeline only depends on this trait.
pub trait ObjectStore: Send + Sync {
    /// Upload the file at `path` under `key` and return where it landed.
    fn upload(
        &self,
        path: &Path,
        key: &str,
    ) -> impl Future<Output = Result<UploadedObject, StorageError>> + Send;
}

/// Object storage client bound to one bucket.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// No network traffic happens here; credentials are checked on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
        }
    }

    /// Read the whole file, detect its type and write it in a single PUT.
    ///
    /// The file is buffered in memory; there is no streaming or multipart path.
    ///
    /// No per-object ACL is sent: OpenDAL exposes no `x-amz-acl` option. The
    /// returned URL is only publicly readable when the bucket policy grants
    /// public read.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the file cannot be read,
    /// [`StorageError::InvalidKey`] for keys that name no object, and
    /// [`StorageError::Operation`] if the provider rejects the write.
    pub async fn upload_file(
        &self,
        path: &Path,
        key: &str,
    ) -> Result<UploadedObject, StorageError> {
        let key = normalize_key(key)?;

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| StorageError::read(path, e))?;
        let content_type = detect_content_type(&data);
        let size = data.len() as u64;

        let mut write = self.operator.write_with(&key, data);
        if self
            .operator
            .info()
            .full_capability()
            .write_with_content_type
        {
            write = write.content_type(content_type);
        }
        write.await.map_err(StorageError::from)?;

        Ok(UploadedObject {
            url: self.public_url(&key),
            key,
            content_type,
            size,
        })
    }

    /// Public URL for an object key: `<endpoint>/<bucket>/<key>`.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.config.provider.public_base(),
            key.trim_start_matches('/')
        )
    }

    /// Fetch metadata for a stored object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or cannot be accessed.
    pub async fn stat(&self, key: &str) -> Result<ObjectMetadata, StorageError> {
        let key = normalize_key(key)?;
        let meta = self.operator.stat(&key).await.map_err(StorageError::from)?;

        Ok(ObjectMetadata {
            key,
            size: meta.content_length(),
            content_type: meta.content_type().map(String::from),
        })
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.config.provider.bucket()
    }
}

impl ObjectStore for StorageService {
    async fn upload(&self, path: &Path, key: &str) -> Result<UploadedObject, StorageError> {
        self.upload_file(path, key).await
    }
}

/// Strip leading slashes; the provider roots every key at the bucket.
fn normalize_key(key: &str) -> Result<String, StorageError> {
    let trimmed = key.trim_start_matches('/');
    if trimmed.is_empty() || trimmed.ends_with('/') {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sniff::{OCTET_STREAM, TEXT_PLAIN};
    use tempfile::TempDir;

    fn local_service(dir: &TempDir) -> StorageService {
        let config = StorageConfig::new(StorageProvider::local_fs(dir.path().join("bucket")));
        StorageService::from_config(config).expect("should create service")
    }

    fn s3_service() -> StorageService {
        let config = StorageConfig::new(StorageProvider::s3(
            "https://storage.yandexcloud.net",
            "media",
            "access_key",
            "secret_key",
            "ru-central1",
        ));
        StorageService::from_config(config).expect("should create service")
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("/data/a/b.txt").expect("valid"), "data/a/b.txt");
        assert_eq!(normalize_key("a.txt").expect("valid"), "a.txt");
        assert!(matches!(normalize_key("/"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(normalize_key(""), Err(StorageError::InvalidKey(_))));
        assert!(matches!(normalize_key("dir/"), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_s3_public_url() {
        let service = s3_service();
        assert_eq!(service.provider_name(), "s3");
        assert_eq!(service.bucket(), "media");
        assert_eq!(
            service.public_url("/data/a/b.txt"),
            "https://storage.yandexcloud.net/media/data/a/b.txt"
        );
        assert_eq!(
            service.public_url("photos/cat.png"),
            "https://storage.yandexcloud.net/media/photos/cat.png"
        );
    }

    #[tokio::test]
    async fn test_upload_empty_file() {
        let dir = TempDir::new().expect("tempdir");
        let service = local_service(&dir);
        let file = dir.path().join("empty.bin");
        std::fs::write(&file, b"").expect("write file");

        let uploaded = service
            .upload_file(&file, "uploads/empty.bin")
            .await
            .expect("empty upload should succeed");

        assert_eq!(uploaded.size, 0);
        assert_eq!(uploaded.content_type, OCTET_STREAM);
        assert_eq!(uploaded.url, service.public_url("uploads/empty.bin"));
        assert!(uploaded.url.ends_with("/uploads/empty.bin"));

        let meta = service.stat("uploads/empty.bin").await.expect("stored");
        assert_eq!(meta.size, 0);
    }

    #[tokio::test]
    async fn test_upload_writes_bytes() {
        let dir = TempDir::new().expect("tempdir");
        let service = local_service(&dir);
        let file = dir.path().join("hello.txt");
        std::fs::write(&file, b"hello").expect("write file");

        let uploaded = service
            .upload_file(&file, "/nested/path/hello.txt")
            .await
            .expect("upload should succeed");

        assert_eq!(uploaded.key, "nested/path/hello.txt");
        assert_eq!(uploaded.content_type, TEXT_PLAIN);
        let stored = std::fs::read(dir.path().join("bucket/nested/path/hello.txt"))
            .expect("object on disk");
        assert_eq!(stored, b"hello");
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let dir = TempDir::new().expect("tempdir");
        let service = local_service(&dir);

        let err = service
            .upload_file(&dir.path().join("nope.txt"), "nope.txt")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Read { .. }));
        assert!(service.stat("nope.txt").await.is_err());
    }

    #[tokio::test]
    async fn test_stat_unknown_key_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let service = local_service(&dir);

        let err = service.stat("missing.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }
}
