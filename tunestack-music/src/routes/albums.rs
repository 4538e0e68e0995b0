/// Album endpoints
///
/// - `POST /albums`, `GET /albums`, `GET /albums/{id}`, `DELETE /albums/{id}`

use crate::{
    app::AppState,
    models::album::{Album, CreateAlbum},
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

/// `GET /albums` query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlbumListParams {
    /// Only albums by this artist (exact match)
    pub artist: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create an album
#[utoipa::path(
    post,
    path = "/albums",
    tag = "albums",
    request_body = CreateAlbum,
    responses(
        (status = 201, description = "Album created", body = Album),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_album(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateAlbum>,
) -> ApiResult<(StatusCode, Json<Album>)> {
    req.validate()?;

    let album = Album::create(&state.db, req).await?;

    info!(album_id = album.id, title = %album.title, "Album created");

    Ok((StatusCode::CREATED, Json(album)))
}

/// List albums
#[utoipa::path(
    get,
    path = "/albums",
    tag = "albums",
    params(AlbumListParams),
    responses((status = 200, description = "All albums", body = [Album]))
)]
pub async fn list_albums(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<AlbumListParams>,
) -> ApiResult<Json<Vec<Album>>> {
    let page = ListParams {
        limit: params.limit,
        offset: params.offset,
    };
    let albums = Album::list(
        &state.db,
        params.artist.as_deref(),
        page.sql_limit(),
        page.sql_offset(),
    )
    .await?;

    Ok(Json(albums))
}

/// Get an album by ID
#[utoipa::path(
    get,
    path = "/albums/{id}",
    tag = "albums",
    params(("id" = i64, Path, description = "Album ID")),
    responses(
        (status = 200, description = "The album", body = Album),
        (status = 404, description = "Album not found", body = ErrorResponse)
    )
)]
pub async fn get_album(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Album>> {
    let album = Album::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| album_not_found(id))?;

    Ok(Json(album))
}

/// Delete an album
#[utoipa::path(
    delete,
    path = "/albums/{id}",
    tag = "albums",
    params(("id" = i64, Path, description = "Album ID")),
    responses(
        (status = 200, description = "Album deleted", body = MessageResponse),
        (status = 404, description = "Album not found", body = ErrorResponse)
    )
)]
pub async fn delete_album(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    if !Album::delete(&state.db, id).await? {
        return Err(album_not_found(id));
    }

    info!(album_id = id, "Album deleted");

    Ok(Json(MessageResponse::new(format!(
        "Album {} deleted successfully",
        id
    ))))
}

fn album_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Album {} not found", id))
}
