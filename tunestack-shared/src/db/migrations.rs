/// Schema migrations
///
/// Every service embeds its own `migrations/` directory with
/// `sqlx::migrate!` and passes the resulting [`Migrator`] here, so the three
/// schemas stay separate while startup behaves the same everywhere.
///
/// Files are named `{timestamp}_{name}.sql` and applied in timestamp order.
///
/// # Example
///
/// ```no_run
/// use sqlx::migrate::Migrator;
/// use tunestack_shared::db::migrations::{ensure_database_exists, run_migrations};
/// use tunestack_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example(migrator: &Migrator) -> anyhow::Result<()> {
/// let url = "sqlite://music.db";
/// ensure_database_exists(url).await?;
///
/// let pool = create_pool(DatabaseConfig { url: url.to_string(), ..Default::default() }).await?;
/// let status = run_migrations(&pool, migrator).await?;
/// assert!(status.is_up_to_date);
/// # Ok(())
/// # }
/// ```

use sqlx::{
    migrate::{MigrateDatabase, MigrateError, Migrator},
    sqlite::SqlitePool,
    Sqlite,
};
use tracing::{debug, info, warn};

/// What `_sqlx_migrations` says about a database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Successfully applied migrations
    pub applied_migrations: usize,

    /// Highest applied version
    pub latest_version: Option<i64>,

    /// Whether the latest embedded migration has been applied
    pub is_up_to_date: bool,
}

/// Applies pending migrations and returns the resulting status
///
/// Applied migrations are skipped, so this runs on every startup.
///
/// # Errors
///
/// Fails if a migration errors or an applied migration's checksum no longer
/// matches the embedded file.
pub async fn run_migrations(
    pool: &SqlitePool,
    migrator: &Migrator,
) -> Result<MigrationStatus, MigrateError> {
    debug!(embedded = migrator.iter().count(), "Running migrations");

    if let Err(e) = migrator.run(pool).await {
        warn!(error = %e, "Migration failed");
        return Err(e);
    }

    let status = get_migration_status(pool, migrator).await?;
    info!(
        applied = status.applied_migrations,
        version = ?status.latest_version,
        "Schema up to date"
    );

    Ok(status)
}

/// Reads migration status, comparing against `migrator`'s newest version
pub async fn get_migration_status(
    pool: &SqlitePool,
    migrator: &Migrator,
) -> Result<MigrationStatus, sqlx::Error> {
    let newest_embedded = migrator.iter().map(|m| m.version).max();

    let (tables,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    let (applied, latest_version): (i64, Option<i64>) = if tables == 0 {
        (0, None)
    } else {
        sqlx::query_as("SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?
    };

    Ok(MigrationStatus {
        applied_migrations: applied as usize,
        latest_version,
        is_up_to_date: newest_embedded.map_or(true, |v| latest_version >= Some(v)),
    })
}

/// Creates the SQLite file behind `database_url` if it is missing
///
/// In-memory URLs count as existing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Sqlite::database_exists(database_url).await? {
        return Ok(());
    }

    info!(url = %database_url, "Creating database");
    Sqlite::create_database(database_url).await
}

/// Deletes the SQLite file behind `database_url`, if any
///
/// Destroys every record. Meant for development resets and tests.
pub async fn drop_database(database_url: &str) -> Result<(), sqlx::Error> {
    if !Sqlite::database_exists(database_url).await? {
        return Ok(());
    }

    warn!(url = %database_url, "Dropping database");
    Sqlite::drop_database(database_url).await
}
