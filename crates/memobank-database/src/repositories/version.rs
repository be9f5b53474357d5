//! File version repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use memobank_core::error::{AppError, ErrorKind};
use memobank_core::result::AppResult;
use memobank_entity::version::{FileVersion, NewFileVersion, VersionMetadata};

use crate::store::VersionStore;

/// Version numbers bound per `DELETE`, well under SQLite's host parameter limit.
const DELETE_BATCH_SIZE: usize = 500;

/// SQLite-backed version history.
///
/// The `(project_name, file_name, version)` unique index is the only guard
/// against two writers claiming the same version number.
#[derive(Debug, Clone)]
pub struct VersionRepository {
    pool: SqlitePool,
}

impl VersionRepository {
    /// Create a new version repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VersionRow {
    id: String,
    file_id: String,
    project_name: String,
    file_name: String,
    content: String,
    version: i32,
    checksum: String,
    size: i64,
    metadata: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<VersionRow> for FileVersion {
    type Error = AppError;

    fn try_from(row: VersionRow) -> Result<Self, Self::Error> {
        let parse = |raw: &str| {
            Uuid::parse_str(raw).map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Stored version id is not a UUID", e)
            })
        };
        let metadata = row
            .metadata
            .as_deref()
            .map(serde_json::from_str::<VersionMetadata>)
            .transpose()?;

        Ok(FileVersion {
            id: parse(&row.id)?,
            file_id: parse(&row.file_id)?,
            project_name: row.project_name,
            file_name: row.file_name,
            content: row.content,
            version: row.version,
            checksum: row.checksum,
            size: row.size,
            created_at: row.created_at,
            metadata,
        })
    }
}

#[async_trait]
impl VersionStore for VersionRepository {
    async fn create_version(&self, version: NewFileVersion) -> AppResult<FileVersion> {
        let metadata = version
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let stored = version.into_version();

        sqlx::query(
            "INSERT INTO file_versions \
             (id, file_id, project_name, file_name, content, version, checksum, size, metadata, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(stored.id.to_string())
        .bind(stored.file_id.to_string())
        .bind(&stored.project_name)
        .bind(&stored.file_name)
        .bind(&stored.content)
        .bind(stored.version)
        .bind(&stored.checksum)
        .bind(stored.size)
        .bind(metadata)
        .bind(stored.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create file version", e)
        })?;

        Ok(stored)
    }

    async fn get_versions(&self, project: &str, file: &str) -> AppResult<Vec<FileVersion>> {
        sqlx::query_as::<_, VersionRow>(
            "SELECT * FROM file_versions WHERE project_name = ? AND file_name = ? \
             ORDER BY version DESC",
        )
        .bind(project)
        .bind(file)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list file versions", e))?
        .into_iter()
        .map(FileVersion::try_from)
        .collect()
    }

    async fn get_version(
        &self,
        project: &str,
        file: &str,
        version: i32,
    ) -> AppResult<Option<FileVersion>> {
        sqlx::query_as::<_, VersionRow>(
            "SELECT * FROM file_versions WHERE project_name = ? AND file_name = ? AND version = ?",
        )
        .bind(project)
        .bind(file)
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file version", e))?
        .map(FileVersion::try_from)
        .transpose()
    }

    async fn get_latest_version_number(&self, project: &str, file: &str) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(version), 0) FROM file_versions \
             WHERE project_name = ? AND file_name = ?",
        )
        .bind(project)
        .bind(file)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read latest version number", e)
        })
    }

    async fn delete_versions(&self, project: &str, file: &str, versions: &[i32]) -> AppResult<u64> {
        if versions.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin version delete", e)
        })?;

        let mut deleted = 0;
        for batch in versions.chunks(DELETE_BATCH_SIZE) {
            let mut builder: QueryBuilder<'_, Sqlite> =
                QueryBuilder::new("DELETE FROM file_versions WHERE project_name = ");
            builder
                .push_bind(project)
                .push(" AND file_name = ")
                .push_bind(file)
                .push(" AND version IN (");
            let mut list = builder.separated(", ");
            for version in batch {
                list.push_bind(*version);
            }
            list.push_unseparated(")");

            let result = builder.build().execute(&mut *tx).await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete file versions", e)
            })?;
            deleted += result.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit version delete", e)
        })?;
        Ok(deleted)
    }

    async fn delete_all_versions(&self, project: &str, file: &str) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM file_versions WHERE project_name = ? AND file_name = ?")
                .bind(project)
                .bind(file)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete file versions", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_project_versions(&self, project: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM file_versions WHERE project_name = ?")
            .bind(project)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete project versions", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
