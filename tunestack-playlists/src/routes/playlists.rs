/// Playlist endpoints
///
/// # Endpoints
///
/// - `POST /playlists` - Create a playlist
/// - `GET /playlists` - List playlists, optionally by owner
/// - `GET /playlists/{id}` - Fetch one playlist
/// - `POST /playlists/{id}/songs` - Append a song
/// - `DELETE /playlists/{id}/songs/{song_id}` - Remove a song
/// - `DELETE /playlists/{id}` - Delete a playlist
///
/// Owners and songs are checked against the User and Music services before
/// any write (see [`crate::references`]).

use crate::{
    app::AppState,
    models::playlist::{CreatePlaylist, Playlist, SongChange},
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};
use tunestack_shared::{
    error::{ApiError, ApiResult, ErrorResponse, ValidationErrorDetail},
    http::{
        extract::{AppJson, AppPath, AppQuery},
        MessageResponse,
    },
    pagination::ListParams,
};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// `GET /playlists` query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlaylistListParams {
    /// Only playlists owned by this user
    pub owner_id: Option<i64>,

    /// Maximum number of rows to return
    pub limit: Option<i64>,

    /// Number of rows to skip
    pub offset: Option<i64>,
}

/// Add song request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddSongRequest {
    /// Music Service song ID
    pub song_id: i64,
}

/// Create a playlist
///
/// # Endpoint
///
/// ```text
/// POST /playlists
/// Content-Type: application/json
///
/// {
///   "name": "Road trip",
///   "owner_id": 1,
///   "is_public": true,
///   "song_ids": [3, 1]
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: Owner or one of the songs doesn't exist
/// - `422 Unprocessable Entity`: Validation failed or a song is listed twice
/// - `503 Service Unavailable`: User or Music service unreachable
#[utoipa::path(
    post,
    path = "/playlists",
    tag = "playlists",
    request_body = CreatePlaylist,
    responses(
        (status = 201, description = "Playlist created", body = Playlist),
        (status = 404, description = "Owner or song not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 503, description = "Reference check unavailable", body = ErrorResponse)
    )
)]
pub async fn create_playlist(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreatePlaylist>,
) -> ApiResult<(StatusCode, Json<Playlist>)> {
    req.validate()?;

    let mut seen = HashSet::new();
    if let Some(repeated) = req.song_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "song_ids".to_string(),
            message: format!("Song {} is listed more than once", repeated),
        }]));
    }

    if !state.references.users.user_exists(req.owner_id).await? {
        warn!(owner_id = req.owner_id, "Playlist rejected: unknown owner");
        return Err(user_not_found(req.owner_id));
    }

    for &song_id in &req.song_ids {
        if !state.references.songs.song_exists(song_id).await? {
            warn!(song_id, "Playlist rejected: unknown song");
            return Err(song_not_found(song_id));
        }
    }

    let playlist = Playlist::create(&state.db, req).await?;

    info!(
        playlist_id = playlist.id,
        owner_id = playlist.owner_id,
        songs = playlist.song_ids.len(),
        "Playlist created"
    );

    Ok((StatusCode::CREATED, Json(playlist)))
}

/// List playlists
#[utoipa::path(
    get,
    path = "/playlists",
    tag = "playlists",
    params(PlaylistListParams),
    responses((status = 200, description = "Playlists in creation order", body = [Playlist]))
)]
pub async fn list_playlists(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PlaylistListParams>,
) -> ApiResult<Json<Vec<Playlist>>> {
    let page = ListParams {
        limit: params.limit,
        offset: params.offset,
    };
    let playlists = Playlist::list(
        &state.db,
        params.owner_id,
        page.sql_limit(),
        page.sql_offset(),
    )
    .await?;

    Ok(Json(playlists))
}

/// Get a playlist by ID
#[utoipa::path(
    get,
    path = "/playlists/{id}",
    tag = "playlists",
    params(("id" = i64, Path, description = "Playlist ID")),
    responses(
        (status = 200, description = "The playlist", body = Playlist),
        (status = 404, description = "Playlist not found", body = ErrorResponse)
    )
)]
pub async fn get_playlist(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Playlist>> {
    let playlist = Playlist::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| playlist_not_found(id))?;

    Ok(Json(playlist))
}

/// Append a song to a playlist
///
/// # Errors
///
/// - `404 Not Found`: Playlist or song doesn't exist
/// - `409 Conflict`: The song is already in the playlist
/// - `503 Service Unavailable`: Music service unreachable
#[utoipa::path(
    post,
    path = "/playlists/{id}/songs",
    tag = "playlists",
    params(("id" = i64, Path, description = "Playlist ID")),
    request_body = AddSongRequest,
    responses(
        (status = 200, description = "Updated playlist", body = Playlist),
        (status = 404, description = "Playlist or song not found", body = ErrorResponse),
        (status = 409, description = "Song already in playlist", body = ErrorResponse),
        (status = 503, description = "Reference check unavailable", body = ErrorResponse)
    )
)]
pub async fn add_song(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<AddSongRequest>,
) -> ApiResult<Json<Playlist>> {
    if !Playlist::exists(&state.db, id).await? {
        return Err(playlist_not_found(id));
    }

    if !state.references.songs.song_exists(req.song_id).await? {
        return Err(song_not_found(req.song_id));
    }

    match Playlist::add_song(&state.db, id, req.song_id).await? {
        SongChange::Applied(playlist) => {
            info!(playlist_id = id, song_id = req.song_id, "Song added to playlist");
            Ok(Json(playlist))
        }
        SongChange::PlaylistMissing => Err(playlist_not_found(id)),
        SongChange::Unchanged => Err(ApiError::Conflict(format!(
            "Song {} is already in playlist {}",
            req.song_id, id
        ))),
    }
}

/// Remove a song from a playlist
///
/// The remaining songs keep their order.
#[utoipa::path(
    delete,
    path = "/playlists/{id}/songs/{song_id}",
    tag = "playlists",
    params(
        ("id" = i64, Path, description = "Playlist ID"),
        ("song_id" = i64, Path, description = "Song ID")
    ),
    responses(
        (status = 200, description = "Updated playlist", body = Playlist),
        (status = 404, description = "Playlist not found or song not in it", body = ErrorResponse)
    )
)]
pub async fn remove_song(
    State(state): State<AppState>,
    AppPath((id, song_id)): AppPath<(i64, i64)>,
) -> ApiResult<Json<Playlist>> {
    match Playlist::remove_song(&state.db, id, song_id).await? {
        SongChange::Applied(playlist) => {
            info!(playlist_id = id, song_id, "Song removed from playlist");
            Ok(Json(playlist))
        }
        SongChange::PlaylistMissing => Err(playlist_not_found(id)),
        SongChange::Unchanged => Err(ApiError::NotFound(format!(
            "Song {} is not in playlist {}",
            song_id, id
        ))),
    }
}

/// Delete a playlist
#[utoipa::path(
    delete,
    path = "/playlists/{id}",
    tag = "playlists",
    params(("id" = i64, Path, description = "Playlist ID")),
    responses(
        (status = 200, description = "Playlist deleted", body = MessageResponse),
        (status = 404, description = "Playlist not found", body = ErrorResponse)
    )
)]
pub async fn delete_playlist(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    if !Playlist::delete(&state.db, id).await? {
        return Err(playlist_not_found(id));
    }

    info!(playlist_id = id, "Playlist deleted");

    Ok(Json(MessageResponse::new(format!(
        "Playlist {} deleted successfully",
        id
    ))))
}

fn playlist_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Playlist {} not found", id))
}

fn user_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("User {} not found", id))
}

fn song_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Song {} not found", id))
}
