//! Stowage uploader
//!
//! Walks the configured source directory, uploads every file to object
//! storage and prints the resulting path to ID map.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stowage_core::pipeline::{UploadPipeline, WalkReport};
use stowage_core::storage::{ObjectStore, StorageConfig, StorageProvider, StorageService};
use stowage_db::FileStore;
use stowage_shared::{AppConfig, AppError, AppResult, StorageSettings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stowage=info,stowage_core=info,stowage_db=info,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match start().await {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = e.error_code(), error = %e, "Fatal error");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn start() -> AppResult<WalkReport> {
    let config = AppConfig::load()?;
    run(&config, build_storage).await
}

/// Connect, then build storage and walk. Storage is only built once the
/// database is reachable, so a connect failure uploads nothing.
async fn run<S, F>(config: &AppConfig, build_storage: F) -> AppResult<WalkReport>
where
    S: ObjectStore,
    F: FnOnce(&StorageSettings) -> AppResult<S>,
{
    let mut store = FileStore::new();
    store
        .connect(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let result = upload_tree(config, &store, build_storage).await;

    if let Err(e) = store.close().await {
        warn!(error = %e, "Failed to close database connection");
    }

    result
}

async fn upload_tree<S, F>(
    config: &AppConfig,
    store: &FileStore,
    build_storage: F,
) -> AppResult<WalkReport>
where
    S: ObjectStore,
    F: FnOnce(&StorageSettings) -> AppResult<S>,
{
    store
        .prepare_schema()
        .await
        .map_err(|e| AppError::Migration(e.to_string()))?;

    let storage = build_storage(&config.storage)?;
    let repo = store
        .repository()
        .map_err(|e| AppError::Database(e.to_string()))?;

    UploadPipeline::new(Arc::new(storage), Arc::new(repo))
        .run(&config.source.root)
        .await
        .map_err(|e| AppError::Walk(e.to_string()))
}

fn build_storage(settings: &StorageSettings) -> AppResult<StorageService> {
    let storage = StorageService::from_config(storage_config(settings))
        .map_err(|e| AppError::Storage(e.to_string()))?;
    info!(
        provider = storage.provider_name(),
        bucket = storage.bucket(),
        "Storage configured"
    );
    Ok(storage)
}

fn storage_config(settings: &StorageSettings) -> StorageConfig {
    StorageConfig::new(StorageProvider::s3(
        settings.endpoint.clone(),
        settings.bucket.clone(),
        settings.access_key.clone(),
        settings.secret_key.clone(),
        settings.region.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use stowage_core::storage::{StorageError, UploadedObject};
    use stowage_shared::{DatabaseConfig, SourceConfig};
    use tempfile::TempDir;

    /// Counts upload attempts and refuses every one.
    struct CountingStore(Arc<AtomicUsize>);

    impl ObjectStore for CountingStore {
        async fn upload(&self, _path: &Path, key: &str) -> Result<UploadedObject, StorageError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    fn settings() -> StorageSettings {
        StorageSettings {
            endpoint: "https://storage.yandexcloud.net".to_string(),
            region: "ru-central1".to_string(),
            bucket: "media".to_string(),
            access_key: "AKID".to_string(),
            secret_key: "SECRET".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unreachable_database_stops_before_any_upload() {
        let source = TempDir::new().expect("tempdir");
        std::fs::write(source.path().join("x.txt"), b"hello").expect("write file");
        let config = AppConfig {
            database: DatabaseConfig {
                host: "127.0.0.1".to_string(),
                port: 1,
                user: "stowage".to_string(),
                password: "stowage".to_string(),
                name: "stowage".to_string(),
                max_connections: 1,
                min_connections: 1,
            },
            storage: settings(),
            source: SourceConfig {
                root: source.path().to_path_buf(),
            },
        };
        let uploads = Arc::new(AtomicUsize::new(0));
        let built = AtomicBool::new(false);

        let err = run(&config, |_| {
            built.store(true, Ordering::SeqCst);
            Ok(CountingStore(Arc::clone(&uploads)))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert!(!built.load(Ordering::SeqCst));
        assert_eq!(uploads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_storage_config_from_settings() {
        let config = storage_config(&settings());
        assert_eq!(config.provider.name(), "s3");
        assert_eq!(config.provider.bucket(), "media");
        assert_eq!(
            config.provider.public_base(),
            "https://storage.yandexcloud.net/media"
        );
    }
}
