//! File repository for database operations.
//!
//! Implements file record persistence using SeaORM.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::files;
use stowage_core::file::{FileRecord, FileRecordRepository, NewFileRecord, RecordError};

/// File repository implementation.
#[derive(Debug, Clone)]
pub struct FileRepository {
    db: DatabaseConnection,
}

impl FileRepository {
    /// Create a new file repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Find a file record by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, RecordError> {
        let model = files::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }
}

impl FileRecordRepository for FileRepository {
    async fn create(&self, input: NewFileRecord) -> Result<FileRecord, RecordError> {
        input.validate()?;

        // id and timestamps are left to column defaults.
        let active_model = files::ActiveModel {
            url: Set(input.url),
            is_confirmed: Set(input.is_confirmed),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| RecordError::repository(e.to_string()))?;

        Ok(to_domain(model))
    }
}

/// Convert database model to domain model.
fn to_domain(model: files::Model) -> FileRecord {
    FileRecord {
        id: model.id,
        url: model.url,
        is_confirmed: model.is_confirmed,
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
        deleted_at: model.deleted_at.map(|t| t.with_timezone(&chrono::Utc)),
    }
}
