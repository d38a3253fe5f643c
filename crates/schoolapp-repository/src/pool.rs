//! Database connection pool management.

use async_trait::async_trait;
use schoolapp_config::DatabaseConfig;
use schoolapp_core::{Interface, SchoolError, SchoolResult};
use shaku::Component;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{ConnectOptions, Sqlite, Transaction};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

/// Interface for database pool operations.
///
/// This trait abstracts database pool functionality for dependency injection.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns a reference to the underlying SQLite pool.
    fn inner(&self) -> &SqlitePool;

    /// Opens a transaction on a pooled connection.
    ///
    /// The transaction rolls back when dropped without a commit.
    async fn begin(&self) -> SchoolResult<Transaction<'static, Sqlite>>;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> SchoolResult<()>;

    /// Runs database migrations.
    async fn run_migrations(&self) -> SchoolResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    ///
    /// In-memory databases are pinned to a single connection that is never
    /// recycled, since each SQLite connection to `:memory:` sees its own
    /// empty database.
    pub async fn new(config: &DatabaseConfig) -> SchoolResult<Self> {
        info!("Connecting to SQLite database at {}", config.url);

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| SchoolError::Configuration(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true);
        if !config.log_queries {
            options = options.disable_statement_logging();
        }

        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .min_connections(config.min_connections)
                .max_connections(config.max_connections)
                .idle_timeout(config.idle_timeout())
        };

        let pool = pool_options
            .acquire_timeout(config.connect_timeout())
            .connect_with(options)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                SchoolError::Persistence(format!("Failed to connect: {}", e))
            })?;

        info!("SQLite connection pool established");
        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &SqlitePool {
        &self.pool
    }

    async fn begin(&self) -> SchoolResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    async fn health_check(&self) -> SchoolResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| SchoolError::Persistence(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> SchoolResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Creates a shared database pool, applying migrations when configured.
pub async fn create_pool(config: &DatabaseConfig) -> SchoolResult<Arc<DatabasePool>> {
    let pool = DatabasePool::new(config).await?;
    if config.run_migrations {
        pool.run_migrations().await?;
    }
    Ok(Arc::new(pool))
}
