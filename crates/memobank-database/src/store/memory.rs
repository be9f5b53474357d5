//! In-memory [`VersionStore`] and [`FileStore`] implementations for tests
//! and embedded use.
//!
//! Both use `BTreeMap`s behind a `tokio::sync::RwLock`. The version store
//! rejects duplicate `(project, file, version)` keys the same way the
//! SQLite unique index does.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use memobank_core::error::AppError;
use memobank_core::result::AppResult;
use memobank_entity::file::File;
use memobank_entity::version::{FileVersion, NewFileVersion};

use super::{FileStore, VersionStore};

type FileKey = (String, String);

fn key(project: &str, file: &str) -> FileKey {
    (project.to_string(), file.to_string())
}

/// Version history held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryVersionStore {
    versions: RwLock<BTreeMap<FileKey, BTreeMap<i32, FileVersion>>>,
}

impl InMemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VersionStore for InMemoryVersionStore {
    async fn create_version(&self, version: NewFileVersion) -> AppResult<FileVersion> {
        let mut guard = self.versions.write().await;
        let history = guard
            .entry(key(&version.project_name, &version.file_name))
            .or_default();

        if history.contains_key(&version.version) {
            return Err(AppError::database(format!(
                "Failed to create file version: version {} of {}/{} already exists",
                version.version, version.project_name, version.file_name
            )));
        }

        let stored = version.into_version();
        history.insert(stored.version, stored.clone());
        Ok(stored)
    }

    async fn get_versions(&self, project: &str, file: &str) -> AppResult<Vec<FileVersion>> {
        let guard = self.versions.read().await;
        Ok(guard
            .get(&key(project, file))
            .map(|history| history.values().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_version(
        &self,
        project: &str,
        file: &str,
        version: i32,
    ) -> AppResult<Option<FileVersion>> {
        let guard = self.versions.read().await;
        Ok(guard
            .get(&key(project, file))
            .and_then(|history| history.get(&version))
            .cloned())
    }

    async fn get_latest_version_number(&self, project: &str, file: &str) -> AppResult<i32> {
        let guard = self.versions.read().await;
        Ok(guard
            .get(&key(project, file))
            .and_then(|history| history.keys().next_back().copied())
            .unwrap_or(0))
    }

    async fn delete_versions(&self, project: &str, file: &str, versions: &[i32]) -> AppResult<u64> {
        let mut guard = self.versions.write().await;
        let Some(history) = guard.get_mut(&key(project, file)) else {
            return Ok(0);
        };
        let deleted = versions
            .iter()
            .filter(|v| history.remove(*v).is_some())
            .count();
        Ok(deleted as u64)
    }

    async fn delete_all_versions(&self, project: &str, file: &str) -> AppResult<bool> {
        let mut guard = self.versions.write().await;
        Ok(guard
            .remove(&key(project, file))
            .is_some_and(|history| !history.is_empty()))
    }

    async fn delete_project_versions(&self, project: &str) -> AppResult<bool> {
        let mut guard = self.versions.write().await;
        let mut deleted = false;
        guard.retain(|(p, _), history| {
            if p == project {
                deleted |= !history.is_empty();
                false
            } else {
                true
            }
        });
        Ok(deleted)
    }
}

/// Live file content held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    files: RwLock<BTreeMap<FileKey, File>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn list_projects(&self) -> AppResult<Vec<String>> {
        let guard = self.files.read().await;
        let mut projects: Vec<String> = guard.keys().map(|(p, _)| p.clone()).collect();
        projects.dedup();
        Ok(projects)
    }

    async fn list_files(&self, project: &str) -> AppResult<Vec<File>> {
        let guard = self.files.read().await;
        Ok(guard
            .iter()
            .filter(|((p, _), _)| p == project)
            .map(|(_, f)| f.clone())
            .collect())
    }

    async fn load_file(&self, project: &str, name: &str) -> AppResult<Option<File>> {
        Ok(self.files.read().await.get(&key(project, name)).cloned())
    }

    async fn write_file(&self, project: &str, name: &str, content: &str) -> AppResult<File> {
        let mut guard = self.files.write().await;
        let file = guard
            .entry(key(project, name))
            .and_modify(|f| f.replace_content(content))
            .or_insert_with(|| File::new(project, name, content));
        Ok(file.clone())
    }

    async fn update_file(
        &self,
        project: &str,
        name: &str,
        content: &str,
    ) -> AppResult<Option<File>> {
        let mut guard = self.files.write().await;
        Ok(guard.get_mut(&key(project, name)).map(|f| {
            f.replace_content(content);
            f.clone()
        }))
    }

    async fn delete_file(&self, project: &str, name: &str) -> AppResult<bool> {
        Ok(self.files.write().await.remove(&key(project, name)).is_some())
    }

    async fn delete_project_files(&self, project: &str) -> AppResult<u64> {
        let mut guard = self.files.write().await;
        let before = guard.len();
        guard.retain(|(p, _), _| p != project);
        Ok((before - guard.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use memobank_core::error::ErrorKind;
    use memobank_entity::version::RetentionConfig;

    use super::*;

    async fn record(store: &InMemoryVersionStore, file: &File, version: i32) -> FileVersion {
        store
            .create_version(NewFileVersion::snapshot(file, version, None, false))
            .await
            .expect("create version")
    }

    #[tokio::test]
    async fn test_versions_are_listed_newest_first() {
        let store = InMemoryVersionStore::new();
        let file = File::new("p", "a.md", "x");
        for n in 1..=3 {
            record(&store, &file, n).await;
        }

        let numbers: Vec<i32> = store
            .get_versions("p", "a.md")
            .await
            .expect("list")
            .iter()
            .map(|v| v.version)
            .collect();
        assert_eq!(numbers, vec![3, 2, 1]);
        assert_eq!(store.get_latest_version_number("p", "a.md").await.expect("latest"), 3);
        assert_eq!(store.get_latest_version_number("p", "missing.md").await.expect("latest"), 0);
        assert!(store.get_versions("p", "missing.md").await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_version_is_a_storage_failure() {
        let store = InMemoryVersionStore::new();
        let file = File::new("p", "a.md", "x");
        record(&store, &file, 1).await;

        let err = store
            .create_version(NewFileVersion::snapshot(&file, 1, None, false))
            .await
            .expect_err("duplicate must fail");
        assert_eq!(err.kind, ErrorKind::Database);
    }

    #[tokio::test]
    async fn test_cleanup_uses_retention_policy() {
        let store = InMemoryVersionStore::new();
        let file = File::new("p", "a.md", "x");
        for n in 1..=15 {
            record(&store, &file, n).await;
        }

        let config = RetentionConfig {
            max_versions_per_file: 10,
            auto_cleanup_old_versions: true,
            preserve_versions_for_days: 30,
        };
        let deleted = store
            .cleanup_old_versions("p", "a.md", &config)
            .await
            .expect("cleanup");
        assert_eq!(deleted, 5);

        let remaining = store.get_versions("p", "a.md").await.expect("list");
        assert_eq!(remaining.len(), 10);
        assert_eq!(remaining.last().map(|v| v.version), Some(6));
    }

    #[tokio::test]
    async fn test_cleanup_age_rule() {
        let store = InMemoryVersionStore::new();
        let file = File::new("p", "a.md", "x");
        let mut old = NewFileVersion::snapshot(&file, 1, None, false);
        old.created_at = Utc::now() - Duration::days(45);
        store.create_version(old).await.expect("create");
        record(&store, &file, 2).await;

        let keep = RetentionConfig {
            max_versions_per_file: 10,
            auto_cleanup_old_versions: false,
            preserve_versions_for_days: 30,
        };
        assert_eq!(store.cleanup_old_versions("p", "a.md", &keep).await.expect("cleanup"), 0);

        let prune = RetentionConfig {
            auto_cleanup_old_versions: true,
            ..keep
        };
        assert_eq!(store.cleanup_old_versions("p", "a.md", &prune).await.expect("cleanup"), 1);
        assert!(store.get_version("p", "a.md", 1).await.expect("get").is_none());
        assert!(store.get_version("p", "a.md", 2).await.expect("get").is_some());
    }

    #[tokio::test]
    async fn test_bulk_deletes_report_whether_anything_went() {
        let store = InMemoryVersionStore::new();
        let a = File::new("p", "a.md", "x");
        let b = File::new("p", "b.md", "y");
        let other = File::new("q", "a.md", "z");
        record(&store, &a, 1).await;
        record(&store, &b, 1).await;
        record(&store, &other, 1).await;

        assert!(store.delete_all_versions("p", "a.md").await.expect("delete"));
        assert!(!store.delete_all_versions("p", "a.md").await.expect("delete"));

        assert!(store.delete_project_versions("p").await.expect("delete"));
        assert!(!store.delete_project_versions("p").await.expect("delete"));
        assert_eq!(store.get_latest_version_number("q", "a.md").await.expect("latest"), 1);
    }

    #[tokio::test]
    async fn test_file_store_write_and_update() {
        let store = InMemoryFileStore::new();
        assert!(store.update_file("p", "a.md", "x").await.expect("update").is_none());

        let created = store.write_file("p", "a.md", "one").await.expect("write");
        let updated = store.write_file("p", "a.md", "two").await.expect("write");
        assert_eq!(created.id, updated.id);
        assert_eq!(updated.content, "two");

        store.write_file("q", "b.md", "three").await.expect("write");
        store.write_file("p", "c.md", "four").await.expect("write");
        assert_eq!(store.list_projects().await.expect("projects"), vec!["p", "q"]);

        let names: Vec<String> = store
            .list_files("p")
            .await
            .expect("files")
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["a.md", "c.md"]);

        assert_eq!(store.delete_project_files("p").await.expect("delete"), 2);
        assert!(!store.delete_file("p", "a.md").await.expect("delete"));
        assert!(store.delete_file("q", "b.md").await.expect("delete"));
    }
}
