//! HTTP-level integration tests driven through the Axum router.

mod file_test;
mod helpers;
mod version_test;
