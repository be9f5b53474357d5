//! File-update path.

pub mod service;
pub mod writer;

pub use service::{FileService, ProjectDeletion, SaveOptions, SavedFile};
pub use writer::FileContentWriter;
