//! SQLite connection pool with embedded migrations.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::TodoError;

/// How long a writer waits for another writer's lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Cloneable handle to the SQLite pool.
#[derive(Debug, Clone)]
pub struct DbPool(SqlitePool);

impl DbPool {
    /// Connect to `url`, creating the database file if it does not exist,
    /// and apply pending migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, TodoError> {
        info!(url, max_connections, "connecting to database");

        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Self::migrate(pool).await
    }

    /// Private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` opens its own empty database, so
    /// the pool is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self, TodoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> Result<Self, TodoError> {
        info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self(pool))
    }

    pub fn inner(&self) -> &SqlitePool {
        &self.0
    }

    pub async fn close(&self) {
        self.0.close().await;
    }
}
