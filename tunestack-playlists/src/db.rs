/// Database bootstrap for the Playlist Service

use sqlx::{migrate::Migrator, SqlitePool};
use tunestack_shared::{
    config::ServiceConfig,
    db::{migrations, pool},
};

/// Embedded playlist migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens the playlists database and brings its schema up to date
pub async fn connect(config: &ServiceConfig) -> anyhow::Result<SqlitePool> {
    migrations::ensure_database_exists(&config.database.url).await?;
    let db = pool::create_pool(config.pool_config()).await?;
    migrations::run_migrations(&db, &MIGRATOR).await?;
    Ok(db)
}
