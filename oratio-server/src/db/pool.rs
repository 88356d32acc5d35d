//! Database connection pool and schema management

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Kept low for a single-service deployment.
const MAX_CONNECTIONS: u32 = 5;

/// One connection attempt must resolve within this window to count as
/// established.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Create the prayers table and the unique index on its date key.
/// Safe to re-run; the supervisor calls this after every (re)connect.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS prayers (
            id BIGSERIAL PRIMARY KEY,
            date DATE NOT NULL,
            title TEXT NOT NULL,
            subject TEXT NOT NULL,
            count BIGINT NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS prayers_date_key ON prayers (date);")
        .execute(pool)
        .await?;

    info!("database schema ready");
    Ok(())
}
