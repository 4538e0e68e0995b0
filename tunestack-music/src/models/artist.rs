/// Artist model and database operations
///
/// Artists are standalone records. Songs and albums name their artist as
/// plain text and are not linked to this table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;
use validator::Validate;

/// A recording artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Artist {
    pub id: i64,

    /// Artist name, unique case-insensitively
    pub name: String,

    /// Country of origin
    pub country: Option<String>,

    /// Free-form biography
    pub bio: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Input for creating an artist
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateArtist {
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    pub name: String,

    #[validate(length(max = 100, message = "Country must be at most 100 characters"))]
    pub country: Option<String>,

    #[validate(length(max = 5000, message = "Bio must be at most 5000 characters"))]
    pub bio: Option<String>,
}

impl Artist {
    /// Inserts a new artist
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint database error if the name is taken.
    pub async fn create(pool: &SqlitePool, data: CreateArtist) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Artist>(
            "INSERT INTO artists (name, country, bio, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id, name, country, bio, created_at",
        )
        .bind(data.name)
        .bind(data.country)
        .bind(data.bio)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Artist>(
            "SELECT id, name, country, bio, created_at FROM artists WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists artists in creation order
    pub async fn list(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Artist>(
            "SELECT id, name, country, bio, created_at FROM artists
             ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Deletes an artist; returns true if a row was deleted
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
