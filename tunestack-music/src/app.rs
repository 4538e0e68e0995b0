/// Application state and router builder

use crate::{docs, routes};
use axum::{extract::FromRef, routing::get, Router};
use sqlx::SqlitePool;
use std::sync::Arc;
use tunestack_shared::{
    config::ServiceConfig,
    http::{
        health::{health_routes, ServiceInfo},
        server::apply_middleware,
    },
};

/// Shared application state
#[derive(Clone, FromRef)]
pub struct AppState {
    /// Music catalog database
    pub db: SqlitePool,

    pub config: Arc<ServiceConfig>,

    pub info: ServiceInfo,
}

impl AppState {
    pub fn new(db: SqlitePool, config: ServiceConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
            info: ServiceInfo {
                name: "Music Service",
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

/// Builds the complete router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /                # Service banner
/// ├── GET    /health          # Health check
/// ├── GET    /docs            # Swagger UI
/// ├── POST   /songs
/// ├── GET    /songs[?artist=]
/// ├── GET    /songs/:id
/// ├── PUT    /songs/:id
/// ├── DELETE /songs/:id
/// ├── POST   /artists
/// ├── GET    /artists
/// ├── GET    /artists/:id
/// ├── DELETE /artists/:id
/// ├── POST   /albums
/// ├── GET    /albums[?artist=]
/// ├── GET    /albums/:id
/// └── DELETE /albums/:id
/// ```
pub fn build_router(state: AppState) -> Router {
    let song_routes = Router::new()
        .route(
            "/songs",
            get(routes::songs::list_songs).post(routes::songs::create_song),
        )
        .route(
            "/songs/:id",
            get(routes::songs::get_song)
                .put(routes::songs::update_song)
                .delete(routes::songs::delete_song),
        );

    let artist_routes = Router::new()
        .route(
            "/artists",
            get(routes::artists::list_artists).post(routes::artists::create_artist),
        )
        .route(
            "/artists/:id",
            get(routes::artists::get_artist).delete(routes::artists::delete_artist),
        );

    let album_routes = Router::new()
        .route(
            "/albums",
            get(routes::albums::list_albums).post(routes::albums::create_album),
        )
        .route(
            "/albums/:id",
            get(routes::albums::get_album).delete(routes::albums::delete_album),
        );

    let router = Router::new()
        .merge(health_routes())
        .merge(song_routes)
        .merge(artist_routes)
        .merge(album_routes)
        .merge(docs::docs_routes())
        .with_state(state.clone());

    apply_middleware(router, &state.config.api)
}
