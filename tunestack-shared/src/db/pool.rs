/// SQLite connection pools
///
/// Every service keeps its records in its own SQLite database. File databases
/// are created on first use, journal in WAL mode and enforce foreign keys.
///
/// An in-memory database lives inside a single connection: a second
/// connection to `sqlite::memory:` would see a different, empty database.
/// Those pools are therefore capped at one connection that is never
/// recycled.
///
/// # Example
///
/// ```no_run
/// use tunestack_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let pool = create_pool(DatabaseConfig {
///     url: "sqlite://music.db".to_string(),
///     max_connections: 4,
///     ..Default::default()
/// })
/// .await?;
///
/// let (songs,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM songs")
///     .fetch_one(&pool)
///     .await?;
/// # Ok(())
/// # }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pool settings
///
/// Durations are whole seconds so they map directly onto environment values.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `sqlite://path/to/file.db` or `sqlite::memory:`
    pub url: String,

    /// Upper bound on open connections (default: 10, always 1 in memory)
    pub max_connections: u32,

    /// How long to wait for a free connection or a write lock (default: 30)
    pub acquire_timeout_secs: u64,

    /// Close connections idle for this long (default: 600, file databases only)
    pub idle_timeout_secs: Option<u64>,

    /// Recycle connections older than this (default: 1800, file databases only)
    pub max_lifetime_secs: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: Some(600),
            max_lifetime_secs: Some(1800),
        }
    }
}

impl DatabaseConfig {
    /// A private in-memory database that lives as long as its pool
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            idle_timeout_secs: None,
            max_lifetime_secs: None,
            ..Default::default()
        }
    }

    /// Whether the URL names an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Opens a pool and checks that the database answers
///
/// # Errors
///
/// Fails if the URL is malformed, the file cannot be opened or created, or
/// the first query does not succeed.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = config.is_in_memory();
    let acquire_timeout = Duration::from_secs(config.acquire_timeout_secs);

    let mut connect_options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(acquire_timeout);

    let mut pool_options = SqlitePoolOptions::new().acquire_timeout(acquire_timeout);

    if in_memory {
        // The single connection holds the whole database
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    } else {
        connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
        pool_options = pool_options
            .max_connections(config.max_connections)
            .idle_timeout(config.idle_timeout_secs.map(Duration::from_secs))
            .max_lifetime(config.max_lifetime_secs.map(Duration::from_secs));
    }

    info!(
        url = %config.url,
        max_connections = if in_memory { 1 } else { config.max_connections },
        "Opening SQLite pool"
    );

    let pool = pool_options.connect_with(connect_options).await?;
    health_check(&pool).await?;

    debug!(connections = pool.size(), "SQLite pool ready");
    Ok(pool)
}

/// Runs `SELECT 1` against the pool
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let (one,): (i64,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if one != 1 {
        warn!(value = one, "SELECT 1 answered something else");
        return Err(sqlx::Error::Protocol("unexpected health check result".into()));
    }

    Ok(())
}

/// Closes every connection, checkpointing the WAL
pub async fn close_pool(pool: SqlitePool) {
    pool.close().await;
    info!("SQLite pool closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout_secs, 30);
        assert_eq!(config.idle_timeout_secs, Some(600));
        assert_eq!(config.max_lifetime_secs, Some(1800));
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(DatabaseConfig::in_memory().is_in_memory());

        let file = DatabaseConfig {
            url: "sqlite://users.db".to_string(),
            ..Default::default()
        };
        assert!(!file.is_in_memory());

        let shared = DatabaseConfig {
            url: "sqlite:file:test?mode=memory&cache=shared".to_string(),
            ..Default::default()
        };
        assert!(shared.is_in_memory());
    }

    #[tokio::test]
    async fn test_in_memory_pool_keeps_state() {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();

        sqlx::query("CREATE TABLE t (v INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO t (v) VALUES (7)")
            .execute(&pool)
            .await
            .unwrap();

        let (v,): (i64,) = sqlx::query_as("SELECT v FROM t")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(v, 7);
        assert_eq!(pool.size(), 1);

        close_pool(pool).await;
    }
}
