/// Artist endpoints
///
/// - `POST /artists`, `GET /artists`, `GET /artists/{id}`, `DELETE /artists/{id}`

use crate::{
    app::AppState,
    models::artist::{Artist, CreateArtist},
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::{info, warn};
use tunestack_shared::{
    error::{ApiError, ApiResult, ErrorResponse},
    http::{
        extract::{AppJson, AppPath, AppQuery},
        MessageResponse,
    },
    pagination::ListParams,
};
use validator::Validate;

/// Create an artist
///
/// # Errors
///
/// - `409 Conflict`: An artist with this name already exists
#[utoipa::path(
    post,
    path = "/artists",
    tag = "artists",
    request_body = CreateArtist,
    responses(
        (status = 201, description = "Artist created", body = Artist),
        (status = 409, description = "Artist name already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_artist(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateArtist>,
) -> ApiResult<(StatusCode, Json<Artist>)> {
    req.validate()?;

    let name = req.name.clone();
    let artist = Artist::create(&state.db, req)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => {
                warn!(name = %name, "Artist rejected: duplicate name");
                ApiError::Conflict(format!("Artist '{}' already exists", name))
            }
            other => other,
        })?;

    info!(artist_id = artist.id, name = %artist.name, "Artist created");

    Ok((StatusCode::CREATED, Json(artist)))
}

/// List artists
#[utoipa::path(
    get,
    path = "/artists",
    tag = "artists",
    params(ListParams),
    responses((status = 200, description = "All artists", body = [Artist]))
)]
pub async fn list_artists(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> ApiResult<Json<Vec<Artist>>> {
    let artists = Artist::list(&state.db, params.sql_limit(), params.sql_offset()).await?;
    Ok(Json(artists))
}

/// Get an artist by ID
#[utoipa::path(
    get,
    path = "/artists/{id}",
    tag = "artists",
    params(("id" = i64, Path, description = "Artist ID")),
    responses(
        (status = 200, description = "The artist", body = Artist),
        (status = 404, description = "Artist not found", body = ErrorResponse)
    )
)]
pub async fn get_artist(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Artist>> {
    let artist = Artist::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| artist_not_found(id))?;

    Ok(Json(artist))
}

/// Delete an artist
#[utoipa::path(
    delete,
    path = "/artists/{id}",
    tag = "artists",
    params(("id" = i64, Path, description = "Artist ID")),
    responses(
        (status = 200, description = "Artist deleted", body = MessageResponse),
        (status = 404, description = "Artist not found", body = ErrorResponse)
    )
)]
pub async fn delete_artist(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    if !Artist::delete(&state.db, id).await? {
        return Err(artist_not_found(id));
    }

    info!(artist_id = id, "Artist deleted");

    Ok(Json(MessageResponse::new(format!(
        "Artist {} deleted successfully",
        id
    ))))
}

fn artist_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Artist {} not found", id))
}
