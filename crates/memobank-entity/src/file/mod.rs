//! File domain entities.

pub mod metadata;
pub mod model;

pub use metadata::{FileMetadata, content_checksum};
pub use model::File;
