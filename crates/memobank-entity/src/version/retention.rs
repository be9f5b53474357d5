//! Retention rules deciding which versions a cleanup pass removes.
//!
//! Two independent rules are evaluated and their results unioned:
//!
//! * **count**: only the `max_versions_per_file` newest versions survive.
//! * **age**: when enabled, anything created before
//!   `now - preserve_versions_for_days` is removed.
//!
//! Nothing protects the last remaining version of a file. An aggressive
//! configuration can delete a file's entire history.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use memobank_core::config::VersioningConfig;

use super::model::FileVersion;

/// Retention rules for one cleanup pass. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionConfig {
    /// Keep the N most recent versions by version number.
    pub max_versions_per_file: usize,
    /// Gate for the age rule.
    pub auto_cleanup_old_versions: bool,
    /// Age threshold in days. `0` disables the age rule.
    pub preserve_versions_for_days: u32,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self::from_settings(&VersioningConfig::default(), None)
    }
}

impl RetentionConfig {
    /// Build the rules from configured defaults.
    ///
    /// An absent or zero `max_override` falls back to the configured
    /// maximum.
    pub fn from_settings(settings: &VersioningConfig, max_override: Option<u32>) -> Self {
        let max = max_override
            .filter(|n| *n > 0)
            .unwrap_or(settings.max_versions_per_file);
        Self {
            max_versions_per_file: max as usize,
            auto_cleanup_old_versions: settings.auto_cleanup_old_versions,
            preserve_versions_for_days: settings.preserve_versions_for_days,
        }
    }

    /// The instant before which versions are too old, if the age rule is on.
    pub fn age_cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        (self.auto_cleanup_old_versions && self.preserve_versions_for_days > 0)
            .then(|| now - Duration::days(i64::from(self.preserve_versions_for_days)))
    }
}

/// Pure decision logic over one file's versions.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    config: RetentionConfig,
}

impl RetentionPolicy {
    /// Create a policy for `config`.
    pub fn new(config: RetentionConfig) -> Self {
        Self { config }
    }

    /// The rules this policy applies.
    pub fn config(&self) -> &RetentionConfig {
        &self.config
    }

    /// Version numbers to delete, ascending and without duplicates.
    ///
    /// `versions` must all belong to the same file. They are ranked by
    /// version number, newest first, before the count rule is applied.
    pub fn select_for_deletion(&self, versions: &[FileVersion], now: DateTime<Utc>) -> Vec<i32> {
        let mut ranked: Vec<&FileVersion> = versions.iter().collect();
        ranked.sort_by(|a, b| b.version.cmp(&a.version));

        let mut doomed: BTreeSet<i32> = ranked
            .iter()
            .skip(self.config.max_versions_per_file)
            .map(|v| v.version)
            .collect();

        if let Some(cutoff) = self.config.age_cutoff(now) {
            doomed.extend(
                ranked
                    .iter()
                    .filter(|v| v.created_at < cutoff)
                    .map(|v| v.version),
            );
        }

        doomed.into_iter().collect()
    }
}
