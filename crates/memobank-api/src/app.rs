//! Application builder: wires router, middleware and state into an Axum app
//! and runs it next to the cleanup scheduler.

use axum::Router;

use memobank_core::config::AppConfig;
use memobank_core::error::AppError;
use memobank_database::DatabasePool;
use memobank_worker::CronScheduler;
use memobank_worker::jobs::VersionCleanupJob;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Memobank server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting Memobank server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let worker_config = config.worker.clone();
    let state = AppState::with_database(config, db.clone());

    let mut scheduler = if worker_config.enabled {
        let scheduler = CronScheduler::new(worker_config).await?;
        let cleanup = VersionCleanupJob::new(state.version_service.as_ref().clone());
        scheduler.register_default_tasks(cleanup).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Worker disabled, scheduled version cleanup is off");
        None
    };

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Memobank server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)));

    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!("Scheduler shutdown failed: {}", e);
        }
    }
    db.close().await;

    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
