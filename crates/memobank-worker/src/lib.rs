//! Scheduled background tasks for Memobank.
//!
//! This crate provides:
//! - A cron scheduler driven by the `[worker]` configuration section
//! - The project-wide version cleanup job it runs

pub mod jobs;
pub mod scheduler;

pub use jobs::VersionCleanupJob;
pub use scheduler::CronScheduler;
