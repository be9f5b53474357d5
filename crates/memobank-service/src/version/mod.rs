//! File version use cases.

pub mod diff;
pub mod recorder;
pub mod service;

pub use diff::VersionDiffer;
pub use recorder::VersionRecorder;
pub use service::VersionService;
