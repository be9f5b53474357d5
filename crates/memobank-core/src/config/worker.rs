//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled maintenance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduler is started with the server.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression for the project-wide version cleanup.
    #[serde(default = "default_version_cleanup_cron")]
    pub version_cleanup_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            version_cleanup_cron: default_version_cleanup_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_version_cleanup_cron() -> String {
    "0 0 3 * * *".to_string()
}
