//! Built-in scheduled jobs.

pub mod cleanup;

pub use cleanup::VersionCleanupJob;
