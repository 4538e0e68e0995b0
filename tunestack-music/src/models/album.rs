/// Album model and database operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;
use validator::Validate;

/// An album, attributed to an artist by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub release_year: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an album
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAlbum {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 200, message = "Artist must be 1 to 200 characters"))]
    pub artist: String,

    #[validate(range(min = 1000, max = 9999, message = "Release year must have four digits"))]
    pub release_year: Option<i64>,
}

impl Album {
    pub async fn create(pool: &SqlitePool, data: CreateAlbum) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Album>(
            "INSERT INTO albums (title, artist, release_year, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id, title, artist, release_year, created_at",
        )
        .bind(data.title)
        .bind(data.artist)
        .bind(data.release_year)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Album>(
            "SELECT id, title, artist, release_year, created_at FROM albums WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists albums in creation order, optionally one artist's
    pub async fn list(
        pool: &SqlitePool,
        artist: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Album>(
            "SELECT id, title, artist, release_year, created_at FROM albums
             WHERE (?1 IS NULL OR artist = ?1)
             ORDER BY id LIMIT ?2 OFFSET ?3",
        )
        .bind(artist)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM albums WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
