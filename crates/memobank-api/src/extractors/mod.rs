//! Custom Axum extractors and path helpers.

pub mod path;
pub mod validated;

pub use path::{parse_version_number, require_name};
pub use validated::ValidatedJson;
