use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Connection pool owner. The pool is created lazily on first use so the
/// server can start (and the router can be exercised in-process) before a
/// database is reachable.
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn pool() -> Result<PgPool, DatabaseError> {
        let pool = POOL.get_or_try_init(|| Self::connect()).await?;
        Ok(pool.clone())
    }

    async fn connect() -> Result<PgPool, DatabaseError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let db = &config::config().database;
        let pool = PgPoolOptions::new()
            .max_connections(db.max_connections)
            .acquire_timeout(Duration::from_secs(db.connect_timeout_secs))
            .connect(&url)
            .await?;

        info!("created database pool (max_connections={})", db.max_connections);
        Ok(pool)
    }

    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }

    /// Create the content and audit tables if they do not exist. Idempotent;
    /// run at startup so a fresh database serves traffic without a separate
    /// migration step.
    pub async fn ensure_schema() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS content_records (
                id UUID PRIMARY KEY,
                resource TEXT NOT NULL,
                doc JSONB NOT NULL,
                display_order INT NOT NULL DEFAULT 0,
                is_active BOOL NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )"#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS content_records_resource_idx
             ON content_records (resource, display_order)",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS audit_log (
                id UUID PRIMARY KEY,
                at TIMESTAMPTZ NOT NULL,
                user_id UUID NOT NULL,
                action TEXT NOT NULL,
                resource TEXT NOT NULL,
                details JSONB NOT NULL
            )"#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS audit_log_at_idx ON audit_log (at DESC)",
        )
        .execute(&pool)
        .await?;

        info!("database schema verified");
        Ok(())
    }
}
