//! Route definitions for the Memobank HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(project_routes())
        .merge(file_routes())
        .merge(version_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(middleware::compression::build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Project listing and removal
fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(handlers::file::list_projects))
        .route(
            "/projects/{project}",
            axum::routing::delete(handlers::file::delete_project),
        )
        .route("/projects/{project}/files", get(handlers::file::list_files))
}

/// File read, write and delete
fn file_routes() -> Router<AppState> {
    Router::new().route(
        "/projects/{project}/files/{file}",
        get(handlers::file::get_file)
            .put(handlers::file::write_file)
            .delete(handlers::file::delete_file),
    )
}

/// Version history, compare, revert and cleanup
fn version_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{project}/files/{file}/versions",
            get(handlers::version::list_versions),
        )
        .route(
            "/projects/{project}/files/{file}/versions/{version}",
            get(handlers::version::get_version),
        )
        .route(
            "/projects/{project}/files/{file}/versions/{version}/revert",
            post(handlers::version::revert_version),
        )
        .route(
            "/projects/{project}/files/{file}/compare",
            get(handlers::version::compare_versions),
        )
        .route(
            "/projects/{project}/versions/cleanup",
            post(handlers::version::cleanup_versions),
        )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use memobank_core::config::AppConfig;

    use super::*;

    async fn send(router: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if body.is_some() {
            req = req.header("content-type", "application/json");
        }
        let req = req
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .expect("request");

        let response = router.clone().oneshot(req).await.expect("response");
        let status = response.status();
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health_over_in_memory_stores() {
        let router = build_router(AppState::in_memory(AppConfig::default()));

        let (status, body) = send(&router, "GET", "/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["database"], "in-memory");
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_write_then_revert_over_in_memory_stores() {
        let router = build_router(AppState::in_memory(AppConfig::default()));

        let (status, _) = send(&router, "PUT", "/api/projects/p/files/f.md", Some(r#"{"content":"v1"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let (_, body) = send(&router, "PUT", "/api/projects/p/files/f.md", Some(r#"{"content":"v2"}"#)).await;
        assert_eq!(body["data"]["version"], 2);

        let (status, body) = send(&router, "POST", "/api/projects/p/files/f.md/versions/1/revert", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["newVersion"], 3);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let router = build_router(AppState::in_memory(AppConfig::default()));

        let (status, _) = send(&router, "GET", "/api/files", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
