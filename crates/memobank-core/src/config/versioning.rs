//! Version retention configuration.

use serde::{Deserialize, Serialize};

/// Defaults applied when a cleanup pass builds its retention rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersioningConfig {
    /// Number of most recent versions kept per file.
    #[serde(default = "default_max_versions")]
    pub max_versions_per_file: u32,
    /// Whether the age rule is applied at all.
    #[serde(default = "default_true")]
    pub auto_cleanup_old_versions: bool,
    /// Versions older than this many days are eligible for deletion.
    /// `0` disables the age rule.
    #[serde(default = "default_preserve_days")]
    pub preserve_versions_for_days: u32,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            max_versions_per_file: default_max_versions(),
            auto_cleanup_old_versions: default_true(),
            preserve_versions_for_days: default_preserve_days(),
        }
    }
}

fn default_max_versions() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_preserve_days() -> u32 {
    30
}
