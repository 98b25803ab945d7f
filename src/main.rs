//! Notice Store migration tool
//!
//! Loads configuration, brings the notification schema up to date and
//! verifies the database is reachable.

use tracing_subscriber::{EnvFilter, fmt};

use notice_core::config::AppConfig;
use notice_core::error::AppError;
use notice_core::types::object_id::PaddedIdCanonicalizer;
use notice_database::DatabasePool;

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
        tracing::error!("Migration error: {}", e);
        if let Some(stack) = e.stack() {
            tracing::debug!("Stack:\n{}", stack);
        }
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("NOTICE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
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

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting notice-migrate v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    notice_database::migration::run_migrations(db.pool()).await?;

    if !db.health_check().await? {
        db.close().await;
        return Err(AppError::internal("Database health check returned an unexpected value"));
    }

    let canonicalizer = PaddedIdCanonicalizer::from(&config.notification);
    tracing::info!(
        object_id_width = canonicalizer.width(),
        "Notification schema is up to date"
    );
    db.close().await;
    Ok(())
}
