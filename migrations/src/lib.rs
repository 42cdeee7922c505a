use std::str::FromStr;

pub use sqlx;
use sqlx::{
    migrate::{MigrateError, Migrator},
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

static MIGRATOR: Migrator = sqlx::migrate!("./sql");

/// Opens a pool against `url`, creating the SQLite file if it doesn't exist yet.
pub async fn connect(url: &str) -> sqlx::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    SqlitePoolOptions::new().connect_with(options).await
}

/// Opens a private in-memory database. Every SQLite connection to `:memory:`
/// sees its own database, so the pool is pinned to a single connection that
/// is never recycled.
pub async fn connect_in_memory() -> sqlx::Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

pub async fn run_all(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

pub async fn undo_all(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.undo(pool, 0).await
}
