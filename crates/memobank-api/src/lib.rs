//! # memobank-api
//!
//! HTTP API layer for Memobank built on Axum.
//!
//! Provides the REST endpoints for files and their version history,
//! middleware (CORS, compression, request logging), extractors, DTOs,
//! error mapping, and the server bootstrap.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
