use std::time::Duration;

use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use crate::{errors::AppError, settings::AppConfig};

pub async fn create_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let max_retries = config.connect_retries;
    let mut retry_count = 0;
    let mut wait_seconds = 2;

    loop {
        match PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => {
                info!(url = %config.redacted_database_url(), "Database connection established.");
                return Ok(pool);
            }
            Err(e) if retry_count < max_retries => {
                retry_count += 1;
                warn!(
                    "Failed to connect to database (attempt {}/{}): {}. Retrying in {}s...",
                    retry_count, max_retries, e, wait_seconds);

                tokio::time::sleep(Duration::from_secs(wait_seconds)).await;

                wait_seconds *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Applies the migrations embedded from `./migrations`. Already-applied
/// versions are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("./migrations");
    info!(count = migrator.iter().count(), "Applying schema migrations");

    migrator.run(pool).await?;

    info!("Schema migrations up to date.");
    Ok(())
}

/// The store's `current_date`, in the session's time zone. Date-relative
/// check constraints are evaluated against this, not the client clock.
pub async fn store_current_date(pool: &PgPool) -> Result<NaiveDate, AppError> {
    let today: NaiveDate = sqlx::query_scalar("SELECT current_date")
        .fetch_one(pool)
        .await?;

    Ok(today)
}
