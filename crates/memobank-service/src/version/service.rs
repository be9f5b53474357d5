//! Version lifecycle: listing, comparison, revert and retention cleanup.

use std::sync::Arc;

use tracing::{debug, info, warn};

use memobank_core::config::VersioningConfig;
use memobank_core::result::AppResult;
use memobank_database::store::{FileStore, VersionStore};
use memobank_entity::version::{FileVersion, RetentionConfig, VersionComparison};

use crate::file::writer::FileContentWriter;
use crate::version::diff::VersionDiffer;

/// Orchestrates version history operations.
///
/// Versions are append-only. A revert never rewrites history: it pushes the
/// old content through the file-update path, which records a new version.
#[derive(Clone)]
pub struct VersionService {
    /// Version storage.
    versions: Arc<dyn VersionStore>,
    /// Live file storage, for enumerating a project's files.
    files: Arc<dyn FileStore>,
    /// File-update path used by revert.
    writer: Arc<dyn FileContentWriter>,
    /// Configured retention defaults.
    settings: VersioningConfig,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(
        versions: Arc<dyn VersionStore>,
        files: Arc<dyn FileStore>,
        writer: Arc<dyn FileContentWriter>,
        settings: VersioningConfig,
    ) -> Self {
        Self {
            versions,
            files,
            writer,
            settings,
        }
    }

    /// The retention rules a cleanup with `max_override` would apply.
    pub fn retention_config(&self, max_override: Option<u32>) -> RetentionConfig {
        RetentionConfig::from_settings(&self.settings, max_override)
    }

    /// All versions of a file, newest first.
    pub async fn get_file_versions(&self, project: &str, file: &str) -> AppResult<Vec<FileVersion>> {
        debug!(project, file, "Listing file versions");
        self.versions.get_versions(project, file).await
    }

    /// One version, or `None` when it does not exist.
    pub async fn get_file_version(
        &self,
        project: &str,
        file: &str,
        version: i32,
    ) -> AppResult<Option<FileVersion>> {
        self.versions.get_version(project, file, version).await
    }

    /// Highest recorded version number, `0` when there are none.
    pub async fn latest_version_number(&self, project: &str, file: &str) -> AppResult<i32> {
        self.versions.get_latest_version_number(project, file).await
    }

    /// Diff two versions of a file. `None` when either is missing.
    pub async fn compare_file_versions(
        &self,
        project: &str,
        file: &str,
        version1: i32,
        version2: i32,
    ) -> AppResult<Option<VersionComparison>> {
        let (first, second) = futures::try_join!(
            self.versions.get_version(project, file, version1),
            self.versions.get_version(project, file, version2),
        )?;

        let (Some(first), Some(second)) = (first, second) else {
            debug!(project, file, version1, version2, "Comparison target missing");
            return Ok(None);
        };

        let differences = VersionDiffer::diff(&first.content, &second.content);
        Ok(Some(VersionComparison {
            version1_content: first.content,
            version2_content: second.content,
            differences,
        }))
    }

    /// Make `version`'s content current again, appending a new version.
    ///
    /// Returns the version the revert produced, or `None` when the target
    /// version or the file itself does not exist.
    pub async fn revert_to_version(
        &self,
        project: &str,
        file: &str,
        version: i32,
    ) -> AppResult<Option<FileVersion>> {
        let Some(target) = self.versions.get_version(project, file, version).await? else {
            return Ok(None);
        };

        let created = self
            .writer
            .update_content(
                project,
                file,
                &target.content,
                Some(format!("Reverted to version {version}")),
            )
            .await?;

        if let Some(created) = &created {
            info!(
                project,
                file,
                reverted_to = version,
                new_version = created.version,
                "File reverted"
            );
        }
        Ok(created)
    }

    /// Boolean form of [`revert_to_version`](Self::revert_to_version).
    pub async fn revert_file_to_version(
        &self,
        project: &str,
        file: &str,
        version: i32,
    ) -> AppResult<bool> {
        Ok(self.revert_to_version(project, file, version).await?.is_some())
    }

    /// Apply retention to every file in a project, returning the number of
    /// versions deleted.
    ///
    /// A file whose cleanup fails is logged and skipped; the total covers
    /// the files that succeeded. Failing to list the project's files is
    /// returned as an error.
    pub async fn cleanup_old_versions(
        &self,
        project: &str,
        max_versions_per_file: Option<u32>,
    ) -> AppResult<u64> {
        let config = self.retention_config(max_versions_per_file);
        let files = self.files.list_files(project).await?;

        let mut total = 0;
        for file in &files {
            match self
                .versions
                .cleanup_old_versions(project, &file.name, &config)
                .await
            {
                Ok(deleted) => total += deleted,
                Err(e) => warn!(
                    project,
                    file = %file.name,
                    error = %e,
                    "Version cleanup failed for file, skipping"
                ),
            }
        }

        info!(
            project,
            files = files.len(),
            deleted = total,
            max_versions_per_file = config.max_versions_per_file,
            "Version cleanup completed"
        );
        Ok(total)
    }

    /// Run [`cleanup_old_versions`](Self::cleanup_old_versions) over every
    /// project. A project that fails is logged and skipped.
    pub async fn cleanup_all_projects(&self, max_versions_per_file: Option<u32>) -> AppResult<u64> {
        let projects = self.files.list_projects().await?;

        let mut total = 0;
        for project in &projects {
            match self.cleanup_old_versions(project, max_versions_per_file).await {
                Ok(deleted) => total += deleted,
                Err(e) => warn!(project = %project, error = %e, "Version cleanup failed for project, skipping"),
            }
        }

        info!(projects = projects.len(), deleted = total, "Scheduled version cleanup completed");
        Ok(total)
    }

    /// Delete every version of one file.
    pub async fn delete_file_versions(&self, project: &str, file: &str) -> AppResult<bool> {
        let deleted = self.versions.delete_all_versions(project, file).await?;
        info!(project, file, deleted, "File versions deleted");
        Ok(deleted)
    }

    /// Delete every version of every file in a project.
    pub async fn delete_project_versions(&self, project: &str) -> AppResult<bool> {
        let deleted = self.versions.delete_project_versions(project).await?;
        info!(project, deleted, "Project versions deleted");
        Ok(deleted)
    }
}
