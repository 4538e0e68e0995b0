/// Integration tests for the SQLite connection pool
///
/// File-backed databases are created in a temporary directory that is removed
/// when the test ends.

use tunestack_shared::db::pool::{close_pool, create_pool, health_check, DatabaseConfig};

fn file_config(dir: &tempfile::TempDir, name: &str) -> DatabaseConfig {
    DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join(name).display()),
        max_connections: 5,
        acquire_timeout_secs: 5,
        idle_timeout_secs: Some(60),
        max_lifetime_secs: Some(300),
    }
}

#[tokio::test]
async fn test_create_pool_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.db");
    assert!(!path.exists());

    let pool = create_pool(file_config(&dir, "fresh.db"))
        .await
        .expect("Failed to create pool");

    assert!(path.exists(), "database file should be created on first use");

    assert!(pool.size() >= 1);
    assert!(pool.size() <= 5);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_create_pool_with_invalid_path() {
    let config = DatabaseConfig {
        url: "sqlite:///nonexistent-dir/deeper/still/x.db".to_string(),
        acquire_timeout_secs: 2,
        ..Default::default()
    };

    let result = create_pool(config).await;
    assert!(result.is_err(), "Should fail when the directory does not exist");
}

#[tokio::test]
async fn test_file_pool_uses_wal_and_foreign_keys() {
    let dir = tempfile::tempdir().unwrap();
    let pool = create_pool(file_config(&dir, "pragmas.db")).await.unwrap();

    let (journal_mode,): (String,) = sqlx::query_as("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(journal_mode.to_lowercase(), "wal");

    let (foreign_keys,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(foreign_keys, 1);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let pool = create_pool(file_config(&dir, "persist.db")).await.unwrap();
    sqlx::query("CREATE TABLE songs (id INTEGER PRIMARY KEY, title TEXT NOT NULL)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO songs (title) VALUES ('Blue in Green')")
        .execute(&pool)
        .await
        .unwrap();
    close_pool(pool).await;

    let pool = create_pool(file_config(&dir, "persist.db")).await.unwrap();
    let (title,): (String,) = sqlx::query_as("SELECT title FROM songs WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(title, "Blue in Green");

    close_pool(pool).await;
}

#[tokio::test]
async fn test_concurrent_queries() {
    let dir = tempfile::tempdir().unwrap();
    let pool = create_pool(file_config(&dir, "concurrent.db")).await.unwrap();

    let mut handles = vec![];
    for i in 0..20i64 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            let row: (i64,) = sqlx::query_as("SELECT ?")
                .bind(i)
                .fetch_one(&pool)
                .await
                .expect("Failed to execute query");
            assert_eq!(row.0, i);
        }));
    }

    for handle in handles {
        handle.await.expect("Task panicked");
    }

    close_pool(pool).await;
}

#[tokio::test]
async fn test_health_check_after_close_fails() {
    let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
    assert!(health_check(&pool).await.is_ok());

    pool.close().await;
    assert!(health_check(&pool).await.is_err());
}
