//! Memobank server: versioned project files over HTTP.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use memobank_core::config::AppConfig;
use memobank_core::error::AppError;
use memobank_database::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("MEMOBANK_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("MEMOBANK_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Memobank v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!(url = %config.database.url, "Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    memobank_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    tracing::info!(
        max_versions_per_file = config.versioning.max_versions_per_file,
        preserve_versions_for_days = config.versioning.preserve_versions_for_days,
        auto_cleanup_old_versions = config.versioning.auto_cleanup_old_versions,
        "Version retention configured"
    );

    memobank_api::run_server(config, db).await?;

    tracing::info!("Memobank server shut down gracefully");
    Ok(())
}
