//! # memobank-service
//!
//! Use-case layer for Memobank. [`FileService`] is the file-update path
//! that records a version on every write; [`VersionService`] lists,
//! compares, reverts and cleans up versions.
//!
//! Services follow constructor injection: every store is handed in at
//! construction time as an `Arc<dyn ...>` trait object, so the same
//! services run over SQLite or the in-memory adapters.

pub mod file;
pub mod version;

pub use file::{FileContentWriter, FileService, ProjectDeletion, SaveOptions, SavedFile};
pub use version::{VersionDiffer, VersionRecorder, VersionService};
