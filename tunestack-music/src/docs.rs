/// OpenAPI document and Swagger UI

use crate::{
    models::{
        album::{Album, CreateAlbum},
        artist::{Artist, CreateArtist},
        song::{CreateSong, Song, UpdateSong},
    },
    routes::{albums, artists, songs},
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
    info(title = "Music Service", description = "Song, artist and album catalog"),
    paths(
        health::root,
        health::health_check,
        songs::create_song,
        songs::list_songs,
        songs::get_song,
        songs::update_song,
        songs::delete_song,
        artists::create_artist,
        artists::list_artists,
        artists::get_artist,
        artists::delete_artist,
        albums::create_album,
        albums::list_albums,
        albums::get_album,
        albums::delete_album,
    ),
    components(schemas(
        health::ServiceBanner,
        health::HealthResponse,
        Song,
        CreateSong,
        UpdateSong,
        Artist,
        CreateArtist,
        Album,
        CreateAlbum,
        MessageResponse,
        ErrorResponse,
        ValidationErrorDetail,
    )),
    tags((name = "health"), (name = "songs"), (name = "artists"), (name = "albums"))
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
