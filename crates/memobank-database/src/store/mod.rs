//! Storage contracts for versions and live files.
//!
//! [`VersionStore`] is plain CRUD over version records keyed by
//! `(project, file, version)`. It enforces uniqueness of that key and
//! nothing else: callers compute the next version number. [`FileStore`] is
//! the live-content collaborator the version lifecycle enumerates and
//! writes through.
//!
//! Implementations must be `Send + Sync` to be shared across request tasks.

pub mod memory;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use memobank_core::result::AppResult;
use memobank_entity::file::File;
use memobank_entity::version::{FileVersion, NewFileVersion, RetentionConfig, RetentionPolicy};

pub use memory::{InMemoryFileStore, InMemoryVersionStore};

/// Durable record of file versions.
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Assign an id and persist. A duplicate `(project, file, version)`
    /// fails with a `Database` error like any other write failure.
    async fn create_version(&self, version: NewFileVersion) -> AppResult<FileVersion>;

    /// All versions of a file, newest first. Empty when none exist.
    async fn get_versions(&self, project: &str, file: &str) -> AppResult<Vec<FileVersion>>;

    /// Exact lookup.
    async fn get_version(
        &self,
        project: &str,
        file: &str,
        version: i32,
    ) -> AppResult<Option<FileVersion>>;

    /// Highest existing version number, `0` when there are none.
    async fn get_latest_version_number(&self, project: &str, file: &str) -> AppResult<i32>;

    /// Delete the given version numbers of one file, returning how many
    /// records were removed.
    async fn delete_versions(&self, project: &str, file: &str, versions: &[i32]) -> AppResult<u64>;

    /// Apply the retention rules to one file and delete what they select.
    async fn cleanup_old_versions(
        &self,
        project: &str,
        file: &str,
        config: &RetentionConfig,
    ) -> AppResult<u64> {
        let versions = self.get_versions(project, file).await?;
        let doomed = RetentionPolicy::new(*config).select_for_deletion(&versions, Utc::now());
        if doomed.is_empty() {
            return Ok(0);
        }

        let deleted = self.delete_versions(project, file, &doomed).await?;
        debug!(project, file, deleted, "Removed old file versions");
        Ok(deleted)
    }

    /// Delete every version of one file. True iff anything was deleted.
    async fn delete_all_versions(&self, project: &str, file: &str) -> AppResult<bool>;

    /// Delete every version of every file in a project. True iff anything
    /// was deleted.
    async fn delete_project_versions(&self, project: &str) -> AppResult<bool>;
}

/// Live file content, one record per `(project, name)`.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Names of every project holding at least one file, sorted.
    async fn list_projects(&self) -> AppResult<Vec<String>>;

    /// Files of a project, sorted by name.
    async fn list_files(&self, project: &str) -> AppResult<Vec<File>>;

    /// Load one file.
    async fn load_file(&self, project: &str, name: &str) -> AppResult<Option<File>>;

    /// Create the file, or replace its content if it already exists.
    async fn write_file(&self, project: &str, name: &str, content: &str) -> AppResult<File>;

    /// Replace the content of an existing file. `None` when it does not exist.
    async fn update_file(&self, project: &str, name: &str, content: &str)
    -> AppResult<Option<File>>;

    /// Delete one file. True iff it existed.
    async fn delete_file(&self, project: &str, name: &str) -> AppResult<bool>;

    /// Delete every file of a project, returning how many were removed.
    async fn delete_project_files(&self, project: &str) -> AppResult<u64>;
}
