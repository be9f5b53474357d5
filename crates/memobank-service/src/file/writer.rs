//! Seam through which reverted content re-enters the file-update path.

use async_trait::async_trait;

use memobank_core::result::AppResult;
use memobank_entity::version::FileVersion;

/// Writes new current content for an existing file, recording a version.
#[async_trait]
pub trait FileContentWriter: Send + Sync {
    /// Replace the content of `project/name`. Returns the version the write
    /// produced, or `None` when the file does not exist.
    async fn update_content(
        &self,
        project: &str,
        name: &str,
        content: &str,
        change_description: Option<String>,
    ) -> AppResult<Option<FileVersion>>;
}
