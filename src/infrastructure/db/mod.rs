use std::time::Duration;

use sqlx::{Pool, Postgres};

pub type PgPool = Pool<Postgres>;

/// Pooled connections are recycled after this long.
pub const POOL_RECYCLE: Duration = Duration::from_secs(300);

pub async fn connect_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .max_lifetime(POOL_RECYCLE)
        .test_before_acquire(true)
        .connect(database_url)
        .await
}

pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    // Embedded from ./migrations at compile time
    sqlx::migrate!("./migrations").run(pool).await
}

pub mod repositories;
