//! SQLite repository implementations of the store traits.

pub mod file;
pub mod version;

pub use file::FileRepository;
pub use version::VersionRepository;
