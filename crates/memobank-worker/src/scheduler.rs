//! Cron scheduler for periodic maintenance tasks.

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use memobank_core::config::WorkerConfig;
use memobank_core::error::AppError;

use crate::jobs::VersionCleanupJob;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Worker settings
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("config", &self.config)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(config: WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, config })
    }

    /// Register all configured tasks. Nothing is registered when the worker
    /// is disabled.
    pub async fn register_default_tasks(&self, cleanup: VersionCleanupJob) -> Result<(), AppError> {
        if !self.config.enabled {
            tracing::info!("Worker disabled, no scheduled tasks registered");
            return Ok(());
        }

        self.register_version_cleanup(cleanup).await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Version cleanup on `worker.version_cleanup_cron`
    async fn register_version_cleanup(&self, cleanup: VersionCleanupJob) -> Result<(), AppError> {
        let schedule = self.config.version_cleanup_cron.as_str();
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let cleanup = cleanup.clone();
            Box::pin(async move {
                if let Err(e) = cleanup.run().await {
                    tracing::error!("Scheduled version cleanup failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid version cleanup schedule '{}': {}",
                schedule, e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add version_cleanup schedule: {}", e))
        })?;

        tracing::info!(schedule, "Registered: version_cleanup");
        Ok(())
    }
}
