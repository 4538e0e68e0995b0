//! # TuneStack Playlist Service
//!
//! Expects the User and Music services at `USER_SERVICE_URL` and
//! `MUSIC_SERVICE_URL` unless `VERIFY_REFERENCES=false`.
//!
//! ```bash
//! cargo run -p tunestack-playlists
//! ```

use tunestack_playlists::{
    app::{build_router, AppState},
    config, db,
    references::References,
};
use tunestack_shared::{db::pool::close_pool, http::server::serve, telemetry::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("tunestack_playlists=debug,tunestack_shared=debug,tower_http=debug");

    tracing::info!(
        "TuneStack Playlist Service v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = config::from_env()?;
    let address = config.service.bind_address();

    let pool = db::connect(&config.service).await?;
    let references = References::from_config(&config.references)?;
    let app = build_router(AppState::new(pool.clone(), config, references));

    serve(app, &address).await?;

    close_pool(pool).await;
    tracing::info!("Playlist Service stopped");

    Ok(())
}
