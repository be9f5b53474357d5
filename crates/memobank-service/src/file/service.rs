//! Live file operations. Every content write records a version.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use memobank_core::result::AppResult;
use memobank_database::store::{FileStore, VersionStore};
use memobank_entity::file::File;
use memobank_entity::version::FileVersion;

use crate::file::writer::FileContentWriter;
use crate::version::recorder::VersionRecorder;

/// How a write should be described in the version it produces.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Human description of the change.
    pub change_description: Option<String>,
    /// Whether the system, not a person, triggered the save.
    pub is_auto_save: bool,
}

/// A stored file together with the version number its write produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFile {
    /// The file after the write.
    pub file: File,
    /// The version recorded for this write.
    pub version: i32,
}

/// Outcome of deleting a whole project.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDeletion {
    /// Number of live files removed.
    pub files_deleted: u64,
    /// Whether any version records were removed.
    pub versions_deleted: bool,
}

/// Handles live file content and fires version creation on every write.
#[derive(Clone)]
pub struct FileService {
    /// Live file storage.
    files: Arc<dyn FileStore>,
    /// Version storage, for cascading deletes.
    versions: Arc<dyn VersionStore>,
    /// Version creation hook.
    recorder: VersionRecorder,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<dyn FileStore>, versions: Arc<dyn VersionStore>) -> Self {
        Self {
            recorder: VersionRecorder::new(Arc::clone(&versions)),
            files,
            versions,
        }
    }

    /// Names of every project with at least one file.
    pub async fn list_projects(&self) -> AppResult<Vec<String>> {
        self.files.list_projects().await
    }

    /// Files in a project, sorted by name.
    pub async fn list_files(&self, project: &str) -> AppResult<Vec<File>> {
        debug!(project, "Listing files");
        self.files.list_files(project).await
    }

    /// Loads one file.
    pub async fn get_file(&self, project: &str, name: &str) -> AppResult<Option<File>> {
        self.files.load_file(project, name).await
    }

    /// Creates or replaces a file, then records a version of the new content.
    pub async fn write_file(
        &self,
        project: &str,
        name: &str,
        content: &str,
        options: SaveOptions,
    ) -> AppResult<SavedFile> {
        let previous = self.files.load_file(project, name).await?;
        let file = self.files.write_file(project, name, content).await?;
        let version = self.record_or_restore(&file, previous, options).await?;

        info!(project, file = name, version = version.version, "File written");
        Ok(SavedFile {
            file,
            version: version.version,
        })
    }

    /// Replaces the content of an existing file and records a version.
    ///
    /// Returns `None`, and records nothing, when the file does not exist.
    pub async fn update_file(
        &self,
        project: &str,
        name: &str,
        content: &str,
        options: SaveOptions,
    ) -> AppResult<Option<(File, FileVersion)>> {
        let previous = self.files.load_file(project, name).await?;
        let Some(file) = self.files.update_file(project, name, content).await? else {
            debug!(project, file = name, "Update skipped, file does not exist");
            return Ok(None);
        };

        let version = self.record_or_restore(&file, previous, options).await?;
        Ok(Some((file, version)))
    }

    /// Records a version of `file`. When that fails the live content is put
    /// back to `previous` (or removed if there was none) so that the current
    /// content always has a version, and the recording error is returned.
    async fn record_or_restore(
        &self,
        file: &File,
        previous: Option<File>,
        options: SaveOptions,
    ) -> AppResult<FileVersion> {
        let err = match self
            .recorder
            .record(file, options.change_description, options.is_auto_save)
            .await
        {
            Ok(version) => return Ok(version),
            Err(err) => err,
        };

        let project = file.project_name.as_str();
        let name = file.name.as_str();
        let restored = match &previous {
            Some(previous) => self
                .files
                .write_file(project, name, &previous.content)
                .await
                .map(|_| ()),
            None => self.files.delete_file(project, name).await.map(|_| ()),
        };

        match restored {
            Ok(()) => warn!(
                project,
                file = name,
                error = %err,
                "Version not recorded, live content restored"
            ),
            Err(restore_err) => warn!(
                project,
                file = name,
                error = %err,
                restore_error = %restore_err,
                "Version not recorded and live content could not be restored"
            ),
        }
        Err(err)
    }

    /// Deletes a file and its whole version history. True iff the file existed.
    pub async fn delete_file(&self, project: &str, name: &str) -> AppResult<bool> {
        let deleted = self.files.delete_file(project, name).await?;
        let versions_deleted = self.versions.delete_all_versions(project, name).await?;

        info!(project, file = name, deleted, versions_deleted, "File deleted");
        Ok(deleted)
    }

    /// Deletes every file of a project and every version recorded under it.
    pub async fn delete_project(&self, project: &str) -> AppResult<ProjectDeletion> {
        let files_deleted = self.files.delete_project_files(project).await?;
        let versions_deleted = self.versions.delete_project_versions(project).await?;

        info!(project, files_deleted, versions_deleted, "Project deleted");
        Ok(ProjectDeletion {
            files_deleted,
            versions_deleted,
        })
    }
}

#[async_trait]
impl FileContentWriter for FileService {
    async fn update_content(
        &self,
        project: &str,
        name: &str,
        content: &str,
        change_description: Option<String>,
    ) -> AppResult<Option<FileVersion>> {
        let options = SaveOptions {
            change_description,
            is_auto_save: false,
        };
        Ok(self
            .update_file(project, name, content, options)
            .await?
            .map(|(_, version)| version))
    }
}

#[cfg(test)]
mod tests {
    use memobank_core::error::{AppError, ErrorKind};
    use memobank_database::store::{InMemoryFileStore, InMemoryVersionStore};
    use memobank_entity::version::NewFileVersion;

    use super::*;

    /// Version store that refuses to create versions at or above `reject_from`.
    struct RejectingVersionStore {
        inner: InMemoryVersionStore,
        reject_from: i32,
    }

    #[async_trait]
    impl VersionStore for RejectingVersionStore {
        async fn create_version(&self, version: NewFileVersion) -> AppResult<FileVersion> {
            if version.version >= self.reject_from {
                return Err(AppError::database("version table unavailable"));
            }
            self.inner.create_version(version).await
        }

        async fn get_versions(&self, project: &str, file: &str) -> AppResult<Vec<FileVersion>> {
            self.inner.get_versions(project, file).await
        }

        async fn get_version(
            &self,
            project: &str,
            file: &str,
            version: i32,
        ) -> AppResult<Option<FileVersion>> {
            self.inner.get_version(project, file, version).await
        }

        async fn get_latest_version_number(&self, project: &str, file: &str) -> AppResult<i32> {
            self.inner.get_latest_version_number(project, file).await
        }

        async fn delete_versions(&self, project: &str, file: &str, versions: &[i32]) -> AppResult<u64> {
            self.inner.delete_versions(project, file, versions).await
        }

        async fn delete_all_versions(&self, project: &str, file: &str) -> AppResult<bool> {
            self.inner.delete_all_versions(project, file).await
        }

        async fn delete_project_versions(&self, project: &str) -> AppResult<bool> {
            self.inner.delete_project_versions(project).await
        }
    }

    fn rejecting_service(reject_from: i32) -> (FileService, Arc<RejectingVersionStore>) {
        let versions = Arc::new(RejectingVersionStore {
            inner: InMemoryVersionStore::new(),
            reject_from,
        });
        let service = FileService::new(Arc::new(InMemoryFileStore::new()), versions.clone());
        (service, versions)
    }

    fn service() -> (FileService, Arc<InMemoryVersionStore>) {
        let versions = Arc::new(InMemoryVersionStore::new());
        let service = FileService::new(Arc::new(InMemoryFileStore::new()), versions.clone());
        (service, versions)
    }

    #[tokio::test]
    async fn test_each_write_appends_a_version() {
        let (service, versions) = service();

        for n in 1..=5 {
            let saved = service
                .write_file("p", "a.md", &format!("draft {n}"), SaveOptions::default())
                .await
                .expect("write");
            assert_eq!(saved.version, n);
            assert_eq!(
                versions.get_latest_version_number("p", "a.md").await.expect("latest"),
                n
            );
        }

        let numbers: Vec<i32> = versions
            .get_versions("p", "a.md")
            .await
            .expect("list")
            .iter()
            .map(|v| v.version)
            .collect();
        assert_eq!(numbers, vec![5, 4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn test_version_carries_snapshot_and_metadata() {
        let (service, versions) = service();
        let options = SaveOptions {
            change_description: Some("initial import".into()),
            is_auto_save: true,
        };
        service
            .write_file("p", "a.md", "first line\nsecond line", options)
            .await
            .expect("write");

        let version = versions
            .get_version("p", "a.md", 1)
            .await
            .expect("get")
            .expect("version exists");
        assert_eq!(version.content, "first line\nsecond line");
        assert_eq!(version.size, 22);

        let meta = version.metadata.expect("metadata");
        assert_eq!(meta.change_description.as_deref(), Some("initial import"));
        assert!(meta.is_auto_save);
        assert_eq!(meta.content.word_count, Some(4));
        assert_eq!(meta.content.line_count, Some(2));
    }

    #[tokio::test]
    async fn test_update_of_missing_file_records_nothing() {
        let (service, versions) = service();
        let result = service
            .update_file("p", "ghost.md", "boo", SaveOptions::default())
            .await
            .expect("update");
        assert!(result.is_none());
        assert_eq!(
            versions.get_latest_version_number("p", "ghost.md").await.expect("latest"),
            0
        );
    }

    #[tokio::test]
    async fn test_delete_file_removes_history() {
        let (service, versions) = service();
        service
            .write_file("p", "a.md", "one", SaveOptions::default())
            .await
            .expect("write");
        service
            .write_file("p", "b.md", "two", SaveOptions::default())
            .await
            .expect("write");

        assert!(service.delete_file("p", "a.md").await.expect("delete"));
        assert!(!service.delete_file("p", "a.md").await.expect("delete"));
        assert!(versions.get_versions("p", "a.md").await.expect("list").is_empty());
        assert_eq!(versions.get_versions("p", "b.md").await.expect("list").len(), 1);

        let outcome = service.delete_project("p").await.expect("delete project");
        assert_eq!(outcome.files_deleted, 1);
        assert!(outcome.versions_deleted);
        assert!(service.list_projects().await.expect("projects").is_empty());
    }

    #[tokio::test]
    async fn test_failed_version_write_restores_previous_content() {
        let (service, versions) = rejecting_service(2);
        service
            .write_file("p", "a.md", "one", SaveOptions::default())
            .await
            .expect("first write");

        let err = service
            .write_file("p", "a.md", "two", SaveOptions::default())
            .await
            .expect_err("second version is rejected");
        assert_eq!(err.kind, ErrorKind::Database);

        let live = service.get_file("p", "a.md").await.expect("get").expect("file exists");
        assert_eq!(live.content, "one");
        assert_eq!(versions.get_versions("p", "a.md").await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn test_failed_update_restores_previous_content() {
        let (service, versions) = rejecting_service(2);
        service
            .write_file("p", "a.md", "one", SaveOptions::default())
            .await
            .expect("first write");

        assert!(
            service
                .update_content("p", "a.md", "two", Some("revert".into()))
                .await
                .is_err()
        );

        let live = service.get_file("p", "a.md").await.expect("get").expect("file exists");
        assert_eq!(live.content, "one");
        assert_eq!(
            versions.get_latest_version_number("p", "a.md").await.expect("latest"),
            1
        );
    }

    #[tokio::test]
    async fn test_failed_first_version_leaves_no_file() {
        let (service, _) = rejecting_service(1);

        assert!(
            service
                .write_file("p", "new.md", "hello", SaveOptions::default())
                .await
                .is_err()
        );
        assert!(service.get_file("p", "new.md").await.expect("get").is_none());
    }
}
