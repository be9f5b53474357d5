//! Version creation fired by the file-update path.

use std::sync::Arc;

use tracing::info;

use memobank_core::result::AppResult;
use memobank_database::store::VersionStore;
use memobank_entity::file::File;
use memobank_entity::version::{FileVersion, NewFileVersion};

/// Appends a version snapshot for a freshly written file.
#[derive(Clone)]
pub struct VersionRecorder {
    versions: Arc<dyn VersionStore>,
}

impl VersionRecorder {
    /// Creates a new recorder over `versions`.
    pub fn new(versions: Arc<dyn VersionStore>) -> Self {
        Self { versions }
    }

    /// Snapshot `file` as version `latest + 1`.
    ///
    /// Two concurrent writers can compute the same number; the loser gets
    /// the store's `Database` error and is not retried here.
    pub async fn record(
        &self,
        file: &File,
        change_description: Option<String>,
        is_auto_save: bool,
    ) -> AppResult<FileVersion> {
        let latest = self
            .versions
            .get_latest_version_number(&file.project_name, &file.name)
            .await?;

        let version = self
            .versions
            .create_version(NewFileVersion::snapshot(
                file,
                latest + 1,
                change_description,
                is_auto_save,
            ))
            .await?;

        info!(
            project = %version.project_name,
            file = %version.file_name,
            version = version.version,
            size = version.size,
            "File version created"
        );

        Ok(version)
    }
}
