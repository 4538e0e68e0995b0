/// Integration tests for the migration runner
///
/// Migrations are written to a temporary directory and loaded at runtime,
/// standing in for the ones each service embeds with `sqlx::migrate!`.

use sqlx::migrate::Migrator;
use tunestack_shared::db::migrations::{
    drop_database, ensure_database_exists, get_migration_status, run_migrations,
};
use tunestack_shared::db::pool::{close_pool, create_pool, DatabaseConfig};

async fn sample_migrator(dir: &tempfile::TempDir) -> Migrator {
    let migrations = dir.path().join("migrations");
    std::fs::create_dir_all(&migrations).unwrap();

    std::fs::write(
        migrations.join("20250101000000_create_artists.sql"),
        "CREATE TABLE artists (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE);",
    )
    .unwrap();
    std::fs::write(
        migrations.join("20250102000000_add_country.sql"),
        "ALTER TABLE artists ADD COLUMN country TEXT;",
    )
    .unwrap();

    Migrator::new(migrations.as_path())
        .await
        .expect("Failed to load migrations")
}

#[tokio::test]
async fn test_ensure_and_drop_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let url = format!("sqlite://{}", path.display());

    ensure_database_exists(&url).await.unwrap();
    assert!(path.exists());

    // Second call is a no-op
    ensure_database_exists(&url).await.unwrap();

    drop_database(&url).await.unwrap();
    assert!(!path.exists());

    // Dropping a missing database is not an error
    drop_database(&url).await.unwrap();
}

#[tokio::test]
async fn test_run_migrations() {
    let dir = tempfile::tempdir().unwrap();
    let migrator = sample_migrator(&dir).await;
    let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();

    let before = get_migration_status(&pool, &migrator).await.unwrap();
    assert!(!before.is_up_to_date);

    let status = run_migrations(&pool, &migrator)
        .await
        .expect("Migrations failed");
    assert_eq!(status, get_migration_status(&pool, &migrator).await.unwrap());
    assert_eq!(status.applied_migrations, 2);
    assert_eq!(status.latest_version, Some(20250102000000));
    assert!(status.is_up_to_date);

    sqlx::query("INSERT INTO artists (name, country) VALUES ('Miles Davis', 'US')")
        .execute(&pool)
        .await
        .expect("Migrated schema should accept inserts");

    close_pool(pool).await;
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let migrator = sample_migrator(&dir).await;
    let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();

    let first = run_migrations(&pool, &migrator).await.unwrap();
    let second = run_migrations(&pool, &migrator).await.unwrap();

    assert_eq!(first, second);

    close_pool(pool).await;
}
