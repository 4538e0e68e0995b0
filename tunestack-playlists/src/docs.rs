/// OpenAPI document and Swagger UI

use crate::{
    models::playlist::{CreatePlaylist, Playlist},
    routes::playlists,
};
use axum::Router;
use tunestack_shared::{
    error::{ErrorResponse, ValidationErrorDetail},
    http::{health, MessageResponse},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Playlist Service", description = "User playlists of catalog songs"),
    paths(
        health::root,
        health::health_check,
        playlists::create_playlist,
        playlists::list_playlists,
        playlists::get_playlist,
        playlists::add_song,
        playlists::remove_song,
        playlists::delete_playlist,
    ),
    components(schemas(
        health::ServiceBanner,
        health::HealthResponse,
        Playlist,
        CreatePlaylist,
        playlists::AddSongRequest,
        MessageResponse,
        ErrorResponse,
        ValidationErrorDetail,
    )),
    tags((name = "health"), (name = "playlists"))
)]
pub struct ApiDoc;

/// Swagger UI at `/docs`, document at `/api-docs/openapi.json`
pub fn docs_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
