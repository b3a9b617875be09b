//! Database client for Hotelhub
//!
//! This module provides a database client that is designed to be database agnostic,
//! using SQLx's `Any` driver as the underlying database library.

use crate::error::DbError;
use hotelhub_config::{AppConfig, DatabaseConfig};
use sqlx::pool::PoolOptions;
use sqlx::{Pool, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Type alias for a database transaction
pub type DbTransaction<'a> = Transaction<'a, sqlx::Any>;

/// Database client for Hotelhub
///
/// Cloning is cheap; all clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Create a new database client from the application configuration
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database configuration is missing
    /// * The database URL is empty
    /// * The database connection fails
    pub async fn new(config: &AppConfig) -> Result<Self, DbError> {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("Database configuration is missing".to_string()))?;

        Self::from_config(db_config).await
    }

    /// Create a new database client from a database configuration
    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        if db_config.url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }

        Self::from_url(&db_config.url).await
    }

    /// Create a new database client from a database URL
    ///
    /// `sqlite::memory:` URLs get a single, never-recycled connection: every
    /// SQLite connection to `:memory:` opens its own private database.
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url).await?;
        Ok(Self { pool })
    }

    async fn create_pool(db_url: &str) -> Result<Pool<sqlx::Any>, DbError> {
        debug!("Creating database pool with URL: {}", db_url);

        // Register the compiled-in drivers with the "any" driver
        sqlx::any::install_default_drivers();

        let in_memory = db_url.contains(":memory:");
        let pool_options = if in_memory {
            PoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            PoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(3))
                .idle_timeout(Duration::from_secs(600))
        };

        if db_url.starts_with("sqlite:") && !in_memory {
            Self::ensure_sqlite_file(db_url)?;
        }

        let connect_options = sqlx::any::AnyConnectOptions::from_str(db_url)
            .map_err(|e| DbError::UrlError(e.to_string()))?;

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                DbError::PoolError(e.to_string())
            })?;

        info!("Database pool created successfully");
        Ok(pool)
    }

    /// SQLite refuses to open a missing file through the `Any` driver, so the
    /// file and its directory are created up front.
    fn ensure_sqlite_file(db_url: &str) -> Result<(), DbError> {
        // Handle both "sqlite:example.db" and "sqlite://example.db" formats
        let db_path = db_url
            .strip_prefix("sqlite://")
            .or_else(|| db_url.strip_prefix("sqlite:"))
            .unwrap_or(db_url);
        // Drop connection parameters such as "?mode=rwc"
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        if db_path.is_empty() {
            return Ok(());
        }

        let path = Path::new(db_path);
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                debug!("Creating directory for SQLite database: {:?}", dir);
                std::fs::create_dir_all(dir).map_err(|e| {
                    error!("Failed to create directory for SQLite database: {}", e);
                    DbError::PoolError(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        if !path.exists() {
            debug!("Creating empty SQLite database file: {}", db_path);
            std::fs::File::create(path).map_err(|e| {
                error!("Failed to create SQLite database file: {}", e);
                DbError::PoolError(format!("Failed to create database file: {}", e))
            })?;
        }

        Ok(())
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Begin a transaction
    pub async fn begin(&self) -> Result<DbTransaction<'static>, DbError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))
    }

    /// Execute a statement that returns no rows, yielding the number of rows affected
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    /// Check if the database is healthy
    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DbClient")
    }
}
