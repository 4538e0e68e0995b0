//! # TuneStack Music Service
//!
//! ```bash
//! MUSIC_SERVICE_PORT=8002 cargo run -p tunestack-music
//! ```

use tunestack_music::{
    app::{build_router, AppState},
    config, db,
};
use tunestack_shared::{db::pool::close_pool, http::server::serve, telemetry::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("tunestack_music=debug,tunestack_shared=debug,tower_http=debug");

    tracing::info!(
        "TuneStack Music Service v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = config::from_env()?;
    let address = config.bind_address();

    let pool = db::connect(&config).await?;
    let app = build_router(AppState::new(pool.clone(), config));

    serve(app, &address).await?;

    close_pool(pool).await;
    tracing::info!("Music Service stopped");

    Ok(())
}
