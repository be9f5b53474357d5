//! Version retention cleanup job.

use memobank_core::result::AppResult;
use memobank_service::VersionService;

/// Applies the configured retention rules to every project.
#[derive(Clone)]
pub struct VersionCleanupJob {
    /// Version service
    versions: VersionService,
}

impl VersionCleanupJob {
    /// Create a new cleanup job
    pub fn new(versions: VersionService) -> Self {
        Self { versions }
    }

    /// Run one pass, returning the number of versions deleted
    pub async fn run(&self) -> AppResult<u64> {
        tracing::info!("Running version cleanup");
        let deleted = self.versions.cleanup_all_projects(None).await?;
        tracing::info!(deleted, "Version cleanup finished");
        Ok(deleted)
    }
}
