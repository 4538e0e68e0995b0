/// Playlist model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE playlists (
///     id          INTEGER PRIMARY KEY AUTOINCREMENT,
///     name        TEXT NOT NULL,
///     description TEXT,
///     owner_id    INTEGER NOT NULL,
///     is_public   INTEGER NOT NULL DEFAULT 0,
///     created_at  TEXT NOT NULL,
///     updated_at  TEXT NOT NULL
/// );
///
/// CREATE TABLE playlist_songs (
///     playlist_id INTEGER NOT NULL REFERENCES playlists (id) ON DELETE CASCADE,
///     position    INTEGER NOT NULL,
///     song_id     INTEGER NOT NULL,
///     added_at    TEXT NOT NULL,
///     PRIMARY KEY (playlist_id, position),
///     UNIQUE (playlist_id, song_id)
/// );
/// ```
///
/// Positions only order the rows. Removing a song leaves a gap and new songs
/// go after the current maximum, so relative order never changes.
///
/// # Example
///
/// ```no_run
/// use tunestack_playlists::models::playlist::{CreatePlaylist, Playlist, SongChange};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let playlist = Playlist::create(&pool, CreatePlaylist {
///     name: "Road trip".to_string(),
///     owner_id: 1,
///     song_ids: vec![3, 1],
///     ..Default::default()
/// }).await?;
///
/// if let SongChange::Applied(updated) = Playlist::add_song(&pool, playlist.id, 2).await? {
///     assert_eq!(updated.song_ids, vec![3, 1, 2]);
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::Validate;

const PLAYLIST_COLUMNS: &str = "id, name, description, owner_id, is_public, created_at, updated_at";

/// A user's ordered list of songs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Playlist {
    pub id: i64,

    /// Display name
    pub name: String,

    pub description: Option<String>,

    /// User Service ID of the owner
    pub owner_id: i64,

    /// Visible to other users
    pub is_public: bool,

    /// Music Service song IDs, in playlist order
    pub song_ids: Vec<i64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `playlists` row without its songs
#[derive(Debug, sqlx::FromRow)]
struct PlaylistRow {
    id: i64,
    name: String,
    description: Option<String>,
    owner_id: i64,
    is_public: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PlaylistRow {
    fn with_songs(self, song_ids: Vec<i64>) -> Playlist {
        Playlist {
            id: self.id,
            name: self.name,
            description: self.description,
            owner_id: self.owner_id,
            is_public: self.is_public,
            song_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Input for creating a playlist
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlaylist {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub owner_id: i64,

    #[serde(default)]
    pub is_public: bool,

    /// Initial songs, in order
    #[serde(default)]
    pub song_ids: Vec<i64>,
}

/// Result of adding or removing a song
#[derive(Debug, Clone, PartialEq)]
pub enum SongChange {
    /// The membership changed; holds the updated playlist
    Applied(Playlist),

    /// No playlist with that ID
    PlaylistMissing,

    /// Add: the song was already present. Remove: it wasn't there.
    Unchanged,
}

impl Playlist {
    /// Inserts a playlist and its initial songs in one transaction
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint database error if `song_ids` repeats a song.
    pub async fn create(pool: &SqlitePool, data: CreatePlaylist) -> Result<Self, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let row = sqlx::query_as::<_, PlaylistRow>(&format!(
            "INSERT INTO playlists (name, description, owner_id, is_public, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {PLAYLIST_COLUMNS}"
        ))
        .bind(data.name)
        .bind(data.description)
        .bind(data.owner_id)
        .bind(data.is_public)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for (position, &song_id) in data.song_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO playlist_songs (playlist_id, position, song_id, added_at)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(row.id)
            .bind(position as i64)
            .bind(song_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(row.with_songs(data.song_ids))
    }

    /// Finds a playlist by ID, songs included
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        load(&mut conn, id).await
    }

    /// Whether a playlist with this ID exists
    pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM playlists WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;

        Ok(count > 0)
    }

    /// Lists playlists in creation order, optionally one owner's
    ///
    /// A negative `limit` returns every row.
    pub async fn list(
        pool: &SqlitePool,
        owner_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut conn = pool.acquire().await?;

        let rows = sqlx::query_as::<_, PlaylistRow>(&format!(
            "SELECT {PLAYLIST_COLUMNS} FROM playlists
             WHERE (?1 IS NULL OR owner_id = ?1)
             ORDER BY id
             LIMIT ?2 OFFSET ?3"
        ))
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        // Same page, one query for every membership on it
        let memberships: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT playlist_id, song_id FROM playlist_songs
             WHERE playlist_id IN (
                 SELECT id FROM playlists
                 WHERE (?1 IS NULL OR owner_id = ?1)
                 ORDER BY id
                 LIMIT ?2 OFFSET ?3
             )
             ORDER BY playlist_id, position",
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;

        let mut songs: HashMap<i64, Vec<i64>> = HashMap::new();
        for (playlist_id, song_id) in memberships {
            songs.entry(playlist_id).or_default().push(song_id);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let song_ids = songs.remove(&row.id).unwrap_or_default();
                row.with_songs(song_ids)
            })
            .collect())
    }

    /// Appends a song to the end of a playlist
    pub async fn add_song(
        pool: &SqlitePool,
        id: i64,
        song_id: i64,
    ) -> Result<SongChange, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        // Writing first takes the write lock before anything is read
        if !touch(&mut tx, id, now).await? {
            return Ok(SongChange::PlaylistMissing);
        }
        if contains_song(&mut tx, id, song_id).await? {
            tx.rollback().await?;
            return Ok(SongChange::Unchanged);
        }

        sqlx::query(
            "INSERT INTO playlist_songs (playlist_id, position, song_id, added_at)
             SELECT ?1, COALESCE(MAX(position) + 1, 0), ?2, ?3
             FROM playlist_songs WHERE playlist_id = ?1",
        )
        .bind(id)
        .bind(song_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let playlist = load(&mut tx, id).await?;
        tx.commit().await?;

        Ok(playlist.map_or(SongChange::PlaylistMissing, SongChange::Applied))
    }

    /// Removes a song, keeping the order of the others
    pub async fn remove_song(
        pool: &SqlitePool,
        id: i64,
        song_id: i64,
    ) -> Result<SongChange, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !touch(&mut tx, id, Utc::now()).await? {
            return Ok(SongChange::PlaylistMissing);
        }

        let removed = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
            .bind(id)
            .bind(song_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            tx.rollback().await?;
            return Ok(SongChange::Unchanged);
        }

        let playlist = load(&mut tx, id).await?;
        tx.commit().await?;

        Ok(playlist.map_or(SongChange::PlaylistMissing, SongChange::Applied))
    }

    /// Deletes a playlist; its memberships go with it
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM playlists")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

async fn load(conn: &mut SqliteConnection, id: i64) -> Result<Option<Playlist>, sqlx::Error> {
    let row = sqlx::query_as::<_, PlaylistRow>(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let song_ids: Vec<i64> = sqlx::query_scalar(
        "SELECT song_id FROM playlist_songs WHERE playlist_id = ? ORDER BY position",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(row.with_songs(song_ids)))
}

async fn contains_song(
    conn: &mut SqliteConnection,
    id: i64,
    song_id: i64,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT song_id FROM playlist_songs WHERE playlist_id = ? AND song_id = ?",
    )
    .bind(id)
    .bind(song_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(found.is_some())
}

/// Bumps `updated_at`; false when the playlist doesn't exist
async fn touch(
    conn: &mut SqliteConnection,
    id: i64,
    now: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
