//! Record store: connection lifecycle around the file repository.

use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::connect;
use crate::migration::Migrator;
use crate::repositories::FileRepository;
use stowage_core::file::{FileRecord, FileRecordRepository, NewFileRecord, RecordError};
use stowage_shared::DatabaseConfig;

/// Owns the database connection used to persist file records.
///
/// Starts disconnected; [`FileStore::close`] is safe to call in any state.
#[derive(Debug, Default)]
pub struct FileStore {
    db: Option<DatabaseConnection>,
}

impl FileStore {
    /// Create a store with no connection yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { db: None }
    }

    /// Wrap an existing connection.
    #[must_use]
    pub const fn from_connection(db: DatabaseConnection) -> Self {
        Self { db: Some(db) }
    }

    /// Open the connection described by `config`. No retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn connect(&mut self, config: &DatabaseConfig) -> Result<(), DbErr> {
        let db = connect(config).await?;
        info!(host = %config.host, port = config.port, database = %config.name, "Connected to database");
        self.db = Some(db);
        Ok(())
    }

    /// Whether [`FileStore::connect`] has succeeded and the store is not closed.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.db.is_some()
    }

    /// Apply pending migrations so the files table exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is not connected or a migration fails.
    pub async fn prepare_schema(&self) -> Result<(), DbErr> {
        let db = self
            .db
            .as_ref()
            .ok_or_else(|| DbErr::Custom(RecordError::NotConnected.to_string()))?;
        Migrator::up(db, None).await?;
        info!("Database schema is up to date");
        Ok(())
    }

    /// Repository over the current connection.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotConnected`] before a successful connect.
    pub fn repository(&self) -> Result<FileRepository, RecordError> {
        self.db
            .clone()
            .map(FileRepository::new)
            .ok_or(RecordError::NotConnected)
    }

    /// Release the connection. A no-op when never connected.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool fails to shut down cleanly.
    pub async fn close(&mut self) -> Result<(), DbErr> {
        match self.db.take() {
            Some(db) => db.close().await,
            None => Ok(()),
        }
    }
}

impl FileRecordRepository for FileStore {
    async fn create(&self, input: NewFileRecord) -> Result<FileRecord, RecordError> {
        self.repository()?.create(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_close_without_connect_is_noop() {
        let mut store = FileStore::new();
        assert!(!store.is_connected());
        store.close().await.expect("closing an unconnected store is fine");
        store.close().await.expect("and idempotent");
    }

    #[tokio::test]
    async fn test_create_before_connect_fails() {
        let store = FileStore::new();
        let err = store
            .create(NewFileRecord::confirmed("https://e/b/k"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::NotConnected));
    }

    #[tokio::test]
    async fn test_prepare_schema_before_connect_fails() {
        let store = FileStore::new();
        assert!(store.prepare_schema().await.is_err());
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_database_fails() {
        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            user: "stowage".to_string(),
            password: "stowage".to_string(),
            name: "stowage".to_string(),
            max_connections: 1,
            min_connections: 1,
        };
        let mut store = FileStore::new();

        assert!(store.connect(&config).await.is_err());
        assert!(!store.is_connected());
    }

    #[test]
    fn test_repository_from_connection() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let store = FileStore::from_connection(db);
        assert!(store.is_connected());
        assert!(store.repository().is_ok());
    }
}
