//! Database access layer: pool bootstrap, migrations, models, repositories.

pub mod models;
pub mod repositories;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

/// Shared connection pool handle. Cheap to clone.
pub type DbPool = sqlx::PgPool;

/// Delay before the single startup reconnection attempt.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Create a connection pool against the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}

/// Create a pool, retrying exactly once after a fixed delay.
///
/// A transient failure at startup (database still coming up) gets one more
/// chance; a second failure propagates and the process exits.
pub async fn create_pool_with_retry(database_url: &str) -> Result<DbPool, sqlx::Error> {
    match create_pool(database_url).await {
        Ok(pool) => Ok(pool),
        Err(err) => {
            tracing::warn!(error = %err, delay_secs = RECONNECT_DELAY.as_secs(), "Database connection failed, retrying once");
            tokio::time::sleep(RECONNECT_DELAY).await;
            create_pool(database_url).await
        }
    }
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
