use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

const ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Creates the PostgreSQL pool backing the assessment, catalog, and
/// recommendation tables. Pool sizing flows from configuration so
/// deployments can tune it per load.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    info!(
        "Connecting guidance-api to PostgreSQL (max {} connections)",
        config.db_max_connections
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect(&config.database_url)
        .await?;

    info!("PostgreSQL pool ready");
    Ok(pool)
}
