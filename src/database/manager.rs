use std::sync::OnceLock;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::config;
use crate::database::repository::DrinkRepository;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the single process-wide connection pool.
pub struct DatabaseManager;

static POOL: OnceLock<PgPool> = OnceLock::new();

impl DatabaseManager {
    /// Connect the pool and bootstrap the drinks table. Called at startup;
    /// safe to call again if the database was unreachable the first time.
    pub async fn connect() -> Result<PgPool, DatabaseError> {
        if let Some(pool) = POOL.get() {
            return Ok(pool.clone());
        }

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let db = &config().database;
        let pool = PgPoolOptions::new()
            .max_connections(db.max_connections)
            .acquire_timeout(Duration::from_secs(db.connect_timeout_secs))
            .connect(&database_url)
            .await?;

        DrinkRepository::ensure_schema(&pool).await?;

        // A concurrent connect may have won the race; keep the stored pool
        let _ = POOL.set(pool.clone());
        info!("database pool connected");
        Ok(POOL.get().cloned().unwrap_or(pool))
    }

    /// Pool accessor for request handlers. Retries the connection lazily if
    /// startup could not reach the database.
    pub async fn pool() -> Result<PgPool, DatabaseError> {
        match POOL.get() {
            Some(pool) => Ok(pool.clone()),
            None => Self::connect().await,
        }
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }

    /// Close the pool on shutdown
    pub async fn close() {
        if let Some(pool) = POOL.get() {
            pool.close().await;
            info!("database pool closed");
        }
    }
}
