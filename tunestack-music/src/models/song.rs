/// Song model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE songs (
///     id               INTEGER PRIMARY KEY AUTOINCREMENT,
///     title            TEXT NOT NULL,
///     artist           TEXT NOT NULL,
///     album            TEXT,
///     genre            TEXT,
///     duration_seconds INTEGER CHECK (duration_seconds IS NULL OR duration_seconds > 0),
///     release_year     INTEGER,
///     created_at       TEXT NOT NULL,
///     updated_at       TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tunestack_music::models::song::{Song, CreateSong, UpdateSong};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let song = Song::create(&pool, CreateSong {
///     title: "So What".to_string(),
///     artist: "Miles Davis".to_string(),
///     album: Some("Kind of Blue".to_string()),
///     ..Default::default()
/// }).await?;
///
/// let update = UpdateSong { genre: Some(Some("Jazz".to_string())), ..Default::default() };
/// Song::update(&pool, song.id, update).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;
use validator::Validate;

const SONG_COLUMNS: &str =
    "id, title, artist, album, genre, duration_seconds, release_year, created_at, updated_at";

/// A song in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Song {
    /// Unique song ID, assigned by SQLite
    pub id: i64,

    /// Song title
    pub title: String,

    /// Performing artist's name
    pub artist: String,

    /// Album title, if any
    pub album: Option<String>,

    /// Genre label
    pub genre: Option<String>,

    /// Length in seconds
    pub duration_seconds: Option<i64>,

    /// Year of release
    pub release_year: Option<i64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a song
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSong {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 200, message = "Artist must be 1 to 200 characters"))]
    pub artist: String,

    #[validate(length(max = 200, message = "Album must be at most 200 characters"))]
    pub album: Option<String>,

    #[validate(length(max = 50, message = "Genre must be at most 50 characters"))]
    pub genre: Option<String>,

    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_seconds: Option<i64>,

    #[validate(range(min = 1000, max = 9999, message = "Release year must have four digits"))]
    pub release_year: Option<i64>,
}

/// Input for updating a song
///
/// Only fields present in the request are changed. The optional columns
/// distinguish an absent field (`None`, left alone) from an explicit `null`
/// (`Some(None)`, cleared).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSong {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Artist must be 1 to 200 characters"))]
    pub artist: Option<String>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 200, message = "Album must be at most 200 characters"))]
    pub album: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 50, message = "Genre must be at most 50 characters"))]
    pub genre: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i64>)]
    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_seconds: Option<Option<i64>>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i64>)]
    #[validate(range(min = 1000, max = 9999, message = "Release year must have four digits"))]
    pub release_year: Option<Option<i64>>,
}

/// A present field, `null` included, becomes `Some`
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Song {
    /// Inserts a new song
    pub async fn create(pool: &SqlitePool, data: CreateSong) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_as::<_, Song>(&format!(
            "INSERT INTO songs (title, artist, album, genre, duration_seconds, release_year, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {SONG_COLUMNS}"
        ))
        .bind(data.title)
        .bind(data.artist)
        .bind(data.album)
        .bind(data.genre)
        .bind(data.duration_seconds)
        .bind(data.release_year)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    /// Finds a song by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Song>(&format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lists songs in insertion order, optionally only one artist's
    ///
    /// A negative `limit` returns every row. The artist match is exact.
    pub async fn list(
        pool: &SqlitePool,
        artist: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs
             WHERE (?1 IS NULL OR artist = ?1)
             ORDER BY id
             LIMIT ?2 OFFSET ?3"
        ))
        .bind(artist)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Updates the supplied fields of a song
    ///
    /// Returns the updated song, or None if it doesn't exist. `updated_at` is
    /// refreshed even when no field changes. `Some(None)` sets a column to NULL.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: UpdateSong,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Placeholders are appended in the same order the values are bound below
        let mut query = String::from("UPDATE songs SET updated_at = ?");

        if data.title.is_some() {
            query.push_str(", title = ?");
        }
        if data.artist.is_some() {
            query.push_str(", artist = ?");
        }
        if data.album.is_some() {
            query.push_str(", album = ?");
        }
        if data.genre.is_some() {
            query.push_str(", genre = ?");
        }
        if data.duration_seconds.is_some() {
            query.push_str(", duration_seconds = ?");
        }
        if data.release_year.is_some() {
            query.push_str(", release_year = ?");
        }

        query.push_str(&format!(" WHERE id = ? RETURNING {SONG_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Song>(&query).bind(Utc::now());

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(artist) = data.artist {
            q = q.bind(artist);
        }
        if let Some(album) = data.album {
            q = q.bind(album);
        }
        if let Some(genre) = data.genre {
            q = q.bind(genre);
        }
        if let Some(duration) = data.duration_seconds {
            q = q.bind(duration);
        }
        if let Some(year) = data.release_year {
            q = q.bind(year);
        }

        q.bind(id).fetch_optional(pool).await
    }

    /// Deletes a song by ID
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts songs in the catalog
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM songs")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
