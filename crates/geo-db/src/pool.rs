//! # Database Handle
//!
//! Opens the SQLite file behind the desk and hands out repositories.
//!
//! ```text
//! DbConfig::new(path) / DbConfig::in_memory()
//!        │
//!        ▼
//! Database::new(config)
//!   1. create the parent directory of the file
//!   2. connect: WAL journal, NORMAL sync, foreign keys on
//!   3. apply pending migrations (001_records ...)
//!        │
//!        ▼
//! db.invoices() / db.customers() / db.products() / db.payments()
//!   SqliteRepository<T> sharing one SqlitePool
//! ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use geo_core::{Customer, Invoice, Payment, Product};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::{Record, SqliteRepository};

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the records live and how many connections may touch them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// A desk is a single user; a few connections cover reads during a save.
    pub max_connections: u32,

    /// How long a command waits for a free connection.
    pub acquire_timeout: Duration,
}

impl DbConfig {
    /// A database file, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            acquire_timeout: Duration::from_secs(10),
        }
    }

    /// A throwaway database. Every connection to `:memory:` sees its own
    /// database, so the pool is held to one connection.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::new().in_memory(true)
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };
        options
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Open record store. Clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (or creates) the database and brings its schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening record store");

        if !config.is_in_memory() {
            if let Some(parent) = config.database_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DbError::ConnectionFailed(format!("{}: {e}", parent.display()))
                    })?;
                }
            }
        }

        // An idle in-memory connection must never be reaped: its data goes with it.
        let idle_timeout = (!config.is_in_memory()).then(|| Duration::from_secs(600));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(idle_timeout)
            .max_lifetime(None::<Duration>)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool ready");

        migrations::run_migrations(&pool).await?;
        Ok(Database { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns a repository over any record collection.
    pub fn repository<T: Record>(&self) -> SqliteRepository<T> {
        SqliteRepository::new(self.pool.clone())
    }

    /// Returns the invoice repository.
    pub fn invoices(&self) -> SqliteRepository<Invoice> {
        self.repository()
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> SqliteRepository<Customer> {
        self.repository()
    }

    /// Returns the product repository.
    pub fn products(&self) -> SqliteRepository<Product> {
        self.repository()
    }

    /// Returns the payment repository.
    pub fn payments(&self) -> SqliteRepository<Payment> {
        self.repository()
    }

    /// Closes the pool. Repositories handed out earlier fail from now on.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// `SELECT 1` round trip.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::migration_status;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        let (total, applied) = migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
    }

    #[test]
    fn test_config_defaults() {
        let file = DbConfig::new("/tmp/geo-invoice.db");
        assert!(!file.is_in_memory());
        assert_eq!(file.max_connections, 4);

        let memory = DbConfig::in_memory();
        assert!(memory.is_in_memory());
        assert_eq!(memory.max_connections, 1);
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("geo-invoice.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(db.health_check().await);
        assert!(path.exists());
        db.close().await;
    }

    #[tokio::test]
    async fn test_closed_pool_fails_health_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }
}
