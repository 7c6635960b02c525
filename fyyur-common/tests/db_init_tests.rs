//! Tests for on-disk database initialization

use fyyur_common::db::init::init_database;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("fyyur.db");

    let result = init_database(&db_path, Duration::from_millis(1000)).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing_and_keeps_rows() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("fyyur.db");

    let pool = init_database(&db_path, Duration::from_millis(1000)).await.unwrap();
    sqlx::query("INSERT INTO Artist (name, city, state) VALUES ('Guns N Petals', 'San Francisco', 'CA')")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    let pool = init_database(&db_path, Duration::from_millis(1000))
        .await
        .expect("Failed to open existing database");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Artist")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_venue_delete_cascades_to_shows() {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("fyyur.db"), Duration::from_millis(1000))
        .await
        .unwrap();

    sqlx::query("INSERT INTO Venue (name, city, state) VALUES ('The Dueling Pianos Bar', 'New York', 'NY')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO Artist (name, city, state) VALUES ('Matt Quevedo', 'New York', 'NY')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO Shows (start_time, venue_id, artist_id) VALUES ('2019-06-15 23:00:00', 1, 1)")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("DELETE FROM Venue WHERE id = 1")
        .execute(&pool)
        .await
        .unwrap();

    let shows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Shows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(shows, 0, "Foreign key cascade must apply on every pooled connection");
}
