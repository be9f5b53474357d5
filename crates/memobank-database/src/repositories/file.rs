//! File repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use memobank_core::error::{AppError, ErrorKind};
use memobank_core::result::AppResult;
use memobank_entity::file::{File, FileMetadata};

use crate::store::FileStore;

/// SQLite-backed live file storage.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FileRow {
    id: String,
    project_name: String,
    name: String,
    content: String,
    size: i64,
    checksum: String,
    metadata: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<FileRow> for File {
    type Error = AppError;

    fn try_from(row: FileRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Stored file id is not a UUID", e)
        })?;
        Ok(File {
            id,
            name: row.name,
            content: row.content,
            project_name: row.project_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
            size: row.size,
            checksum: row.checksum,
            metadata: serde_json::from_str::<FileMetadata>(&row.metadata)?,
        })
    }
}

fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

#[async_trait]
impl FileStore for FileRepository {
    async fn list_projects(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT project_name FROM files ORDER BY project_name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list projects"))
    }

    async fn list_files(&self, project: &str) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, FileRow>("SELECT * FROM files WHERE project_name = ? ORDER BY name ASC")
            .bind(project)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list files"))?
            .into_iter()
            .map(File::try_from)
            .collect()
    }

    async fn load_file(&self, project: &str, name: &str) -> AppResult<Option<File>> {
        sqlx::query_as::<_, FileRow>("SELECT * FROM files WHERE project_name = ? AND name = ?")
            .bind(project)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find file"))?
            .map(File::try_from)
            .transpose()
    }

    async fn write_file(&self, project: &str, name: &str, content: &str) -> AppResult<File> {
        let file = File::new(project, name, content);
        sqlx::query_as::<_, FileRow>(
            "INSERT INTO files (id, project_name, name, content, size, checksum, metadata, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (project_name, name) DO UPDATE SET \
                content = excluded.content, size = excluded.size, checksum = excluded.checksum, \
                metadata = excluded.metadata, updated_at = excluded.updated_at \
             RETURNING *",
        )
        .bind(file.id.to_string())
        .bind(&file.project_name)
        .bind(&file.name)
        .bind(&file.content)
        .bind(file.size)
        .bind(&file.checksum)
        .bind(serde_json::to_string(&file.metadata)?)
        .bind(file.created_at)
        .bind(file.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to write file"))?
        .try_into()
    }

    async fn update_file(
        &self,
        project: &str,
        name: &str,
        content: &str,
    ) -> AppResult<Option<File>> {
        let Some(mut file) = self.load_file(project, name).await? else {
            return Ok(None);
        };
        file.replace_content(content);

        sqlx::query_as::<_, FileRow>(
            "UPDATE files SET content = ?, size = ?, checksum = ?, metadata = ?, updated_at = ? \
             WHERE project_name = ? AND name = ? RETURNING *",
        )
        .bind(&file.content)
        .bind(file.size)
        .bind(&file.checksum)
        .bind(serde_json::to_string(&file.metadata)?)
        .bind(file.updated_at)
        .bind(project)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update file"))?
        .map(File::try_from)
        .transpose()
    }

    async fn delete_file(&self, project: &str, name: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE project_name = ? AND name = ?")
            .bind(project)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete file"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_project_files(&self, project: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE project_name = ?")
            .bind(project)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete project files"))?;
        Ok(result.rows_affected())
    }
}
