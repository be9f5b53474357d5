//! # memobank-database
//!
//! Persistence for Memobank. The [`store`] module defines the storage
//! contracts ([`VersionStore`], [`FileStore`]) and in-memory adapters; the
//! [`repositories`] module implements them on SQLite.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::{FileRepository, VersionRepository};
pub use store::{FileStore, InMemoryFileStore, InMemoryVersionStore, VersionStore};
