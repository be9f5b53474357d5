//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod versions;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use memobank_core::config::AppConfig;
use memobank_core::error::AppError;
use memobank_database::DatabasePool;

/// Memobank: versioned project files over HTTP
#[derive(Debug, Parser)]
#[command(name = "memobank", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Memobank server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Inspect and maintain file version history
    Versions(versions::VersionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Versions(args) => versions::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file, `config/{MEMOBANK_ENV}.toml` and
/// the environment
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("MEMOBANK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
}

/// Helper: connect to the configured database and apply pending migrations
pub async fn connect_database(config: &AppConfig) -> Result<DatabasePool, AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    memobank_database::migration::run_migrations(db.pool()).await?;
    Ok(db)
}
