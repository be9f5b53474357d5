//! # memobank-entity
//!
//! Domain entity models for Memobank. Every struct in this crate
//! represents a stored record or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize` and `Deserialize`, and use
//! camelCase field names on the wire.

pub mod file;
pub mod version;
