use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod error;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

const MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from the database endpoint URL and access key.
///
/// The access key is applied as the connection password, overriding any
/// password embedded in the URL.
pub async fn create_pool(database_url: &str, access_key: &str) -> Result<DbPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url)?.password(access_key);
    tracing::debug!(
        host = options.get_host(),
        database = options.get_database(),
        "Connecting to database"
    );
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
