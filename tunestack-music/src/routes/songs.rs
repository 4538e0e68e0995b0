/// Song endpoints
///
/// # Endpoints
///
/// - `POST /songs` - Add a song
/// - `GET /songs` - List songs, optionally by artist
/// - `GET /songs/{id}` - Fetch one song
/// - `PUT /songs/{id}` - Update the supplied fields
/// - `DELETE /songs/{id}` - Delete a song

use crate::{
    app::AppState,
    models::song::{CreateSong, Song, UpdateSong},
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use tunestack_shared::{
    error::{ApiError, ApiResult, ErrorResponse},
    http::{
        extract::{AppJson, AppPath, AppQuery},
        MessageResponse,
    },
    pagination::ListParams,
};
use utoipa::IntoParams;
use validator::Validate;

/// `GET /songs` query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SongListParams {
    /// Only songs by this artist (exact match)
    pub artist: Option<String>,

    /// Maximum number of rows to return
    pub limit: Option<i64>,

    /// Number of rows to skip
    pub offset: Option<i64>,
}

impl SongListParams {
    fn page(&self) -> ListParams {
        ListParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Add a song to the catalog
///
/// # Endpoint
///
/// ```text
/// POST /songs
/// Content-Type: application/json
///
/// {
///   "title": "So What",
///   "artist": "Miles Davis",
///   "album": "Kind of Blue",
///   "duration_seconds": 562
/// }
/// ```
#[utoipa::path(
    post,
    path = "/songs",
    tag = "songs",
    request_body = CreateSong,
    responses(
        (status = 201, description = "Song created", body = Song),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_song(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateSong>,
) -> ApiResult<(StatusCode, Json<Song>)> {
    req.validate()?;

    let song = Song::create(&state.db, req).await?;

    info!(song_id = song.id, title = %song.title, artist = %song.artist, "Song created");

    Ok((StatusCode::CREATED, Json(song)))
}

/// List songs
#[utoipa::path(
    get,
    path = "/songs",
    tag = "songs",
    params(SongListParams),
    responses((status = 200, description = "Songs in catalog order", body = [Song]))
)]
pub async fn list_songs(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SongListParams>,
) -> ApiResult<Json<Vec<Song>>> {
    let page = params.page();
    let songs = Song::list(
        &state.db,
        params.artist.as_deref(),
        page.sql_limit(),
        page.sql_offset(),
    )
    .await?;

    Ok(Json(songs))
}

/// Get a specific song by ID
#[utoipa::path(
    get,
    path = "/songs/{id}",
    tag = "songs",
    params(("id" = i64, Path, description = "Song ID")),
    responses(
        (status = 200, description = "The song", body = Song),
        (status = 404, description = "Song not found", body = ErrorResponse)
    )
)]
pub async fn get_song(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Song>> {
    let song = Song::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| song_not_found(id))?;

    Ok(Json(song))
}

/// Update a song
///
/// Fields missing from the body keep their current values.
///
/// # Errors
///
/// - `404 Not Found`: No such song
/// - `422 Unprocessable Entity`: Validation failed
#[utoipa::path(
    put,
    path = "/songs/{id}",
    tag = "songs",
    params(("id" = i64, Path, description = "Song ID")),
    request_body = UpdateSong,
    responses(
        (status = 200, description = "Updated song", body = Song),
        (status = 404, description = "Song not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn update_song(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateSong>,
) -> ApiResult<Json<Song>> {
    req.validate()?;

    let song = Song::update(&state.db, id, req)
        .await?
        .ok_or_else(|| song_not_found(id))?;

    info!(song_id = id, "Song updated");

    Ok(Json(song))
}

/// Delete a song
///
/// Playlists referencing the song are not touched.
#[utoipa::path(
    delete,
    path = "/songs/{id}",
    tag = "songs",
    params(("id" = i64, Path, description = "Song ID")),
    responses(
        (status = 200, description = "Song deleted", body = MessageResponse),
        (status = 404, description = "Song not found", body = ErrorResponse)
    )
)]
pub async fn delete_song(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    if !Song::delete(&state.db, id).await? {
        return Err(song_not_found(id));
    }

    info!(song_id = id, "Song deleted");

    Ok(Json(MessageResponse::new(format!(
        "Song {} deleted successfully",
        id
    ))))
}

fn song_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Song {} not found", id))
}
