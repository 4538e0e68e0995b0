/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use tunestack_playlists::{app::{build_router, AppState}, config, db, references::References};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = config::from_env()?;
/// let pool = db::connect(&config.service).await?;
/// let references = References::from_config(&config.references)?;
/// let app = build_router(AppState::new(pool, config, references));
/// # Ok(())
/// # }
/// ```

use crate::{config::PlaylistConfig, docs, references::References, routes};
use axum::{
    extract::FromRef,
    routing::{delete, get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tunestack_shared::http::{
    health::{health_routes, ServiceInfo},
    server::apply_middleware,
};

/// Shared application state
#[derive(Clone, FromRef)]
pub struct AppState {
    /// Playlists database
    pub db: SqlitePool,

    pub config: Arc<PlaylistConfig>,

    pub info: ServiceInfo,

    /// Owner and song existence checks
    pub references: References,
}

impl AppState {
    pub fn new(db: SqlitePool, config: PlaylistConfig, references: References) -> Self {
        Self {
            db,
            config: Arc::new(config),
            info: ServiceInfo {
                name: "Playlist Service",
                version: env!("CARGO_PKG_VERSION"),
            },
            references,
        }
    }
}

/// Builds the complete router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /                              # Service banner
/// ├── GET    /health                        # Health check
/// ├── GET    /docs                          # Swagger UI
/// ├── POST   /playlists
/// ├── GET    /playlists[?owner_id=]
/// ├── GET    /playlists/:id
/// ├── DELETE /playlists/:id
/// ├── POST   /playlists/:id/songs
/// └── DELETE /playlists/:id/songs/:song_id
/// ```
pub fn build_router(state: AppState) -> Router {
    let playlist_routes = Router::new()
        .route(
            "/playlists",
            get(routes::playlists::list_playlists).post(routes::playlists::create_playlist),
        )
        .route(
            "/playlists/:id",
            get(routes::playlists::get_playlist).delete(routes::playlists::delete_playlist),
        )
        .route("/playlists/:id/songs", post(routes::playlists::add_song))
        .route(
            "/playlists/:id/songs/:song_id",
            delete(routes::playlists::remove_song),
        );

    let router = Router::new()
        .merge(health_routes())
        .merge(playlist_routes)
        .merge(docs::docs_routes())
        .with_state(state.clone());

    apply_middleware(router, &state.config.service.api)
}
