//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use notice_core::error::AppError;

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::storage_fault(format!("Failed to run migrations: {e}"), e))?;

    info!("Database migrations completed successfully");
    Ok(())
}
