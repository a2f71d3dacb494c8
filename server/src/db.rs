use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PoolError};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

/// How long startup waits for the first connection before giving up.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    Pool(#[from] PoolError),

    #[error("Failed to run database migrations: {0}")]
    Migrations(String),
}

/// Build the connection pool and bring the schema up to date.
pub fn create_pool(database_url: &str) -> Result<DbPool, DbError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .connection_timeout(CONNECT_TIMEOUT)
        .build(manager)?;

    // Run pending migrations on startup
    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    Ok(pool)
}

pub fn run_migrations(conn: &mut PgConnection) -> Result<(), DbError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbError::Migrations(e.to_string()))?;
    if !applied.is_empty() {
        tracing::info!("Applied {} database migrations", applied.len());
    }
    Ok(())
}
