//! Request logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Logs one line per request. Server errors are raised to `warn`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let query = request.uri().query().map(str::to_owned);
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let query = query.as_deref().unwrap_or("");

    if response.status().is_server_error() {
        tracing::warn!(%method, path = %path, query, status, elapsed_ms, "Request failed");
    } else {
        tracing::info!(%method, path = %path, query, status, elapsed_ms, "Request handled");
    }

    response
}
