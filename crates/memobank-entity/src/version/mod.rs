//! File version domain: snapshots, retention rules, and diff results.

pub mod diff;
pub mod model;
pub mod retention;

pub use diff::{DiffEntry, DiffKind, VersionComparison};
pub use model::{FileVersion, NewFileVersion, VersionMetadata};
pub use retention::{RetentionConfig, RetentionPolicy};
