use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Pool for the ATS database. Candidate lookups are short reads, so a small
/// pool with a bounded acquire wait is enough.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to ATS database...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
        .context("could not connect to DATABASE_URL")?;

    info!("ATS database pool established");
    Ok(pool)
}
