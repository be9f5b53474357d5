//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use memobank_core::config::AppConfig;
use memobank_database::store::{FileStore, InMemoryFileStore, InMemoryVersionStore, VersionStore};
use memobank_database::{DatabasePool, FileRepository, VersionRepository};
use memobank_service::{FileService, VersionService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// SQLite pool, absent when running over in-memory stores
    pub db: Option<DatabasePool>,
    /// File-update path
    pub file_service: Arc<FileService>,
    /// Version history operations
    pub version_service: Arc<VersionService>,
}

impl AppState {
    /// Wire services over the given stores.
    pub fn from_stores(
        config: AppConfig,
        files: Arc<dyn FileStore>,
        versions: Arc<dyn VersionStore>,
        db: Option<DatabasePool>,
    ) -> Self {
        let file_service = Arc::new(FileService::new(files.clone(), versions.clone()));
        let version_service = Arc::new(VersionService::new(
            versions,
            files,
            file_service.clone(),
            config.versioning.clone(),
        ));

        Self {
            config: Arc::new(config),
            db,
            file_service,
            version_service,
        }
    }

    /// Wire services over SQLite repositories sharing `db`.
    pub fn with_database(config: AppConfig, db: DatabasePool) -> Self {
        let files = Arc::new(FileRepository::new(db.pool().clone()));
        let versions = Arc::new(VersionRepository::new(db.pool().clone()));
        Self::from_stores(config, files, versions, Some(db))
    }

    /// Wire services over process-local in-memory stores.
    pub fn in_memory(config: AppConfig) -> Self {
        Self::from_stores(
            config,
            Arc::new(InMemoryFileStore::new()),
            Arc::new(InMemoryVersionStore::new()),
            None,
        )
    }
}
