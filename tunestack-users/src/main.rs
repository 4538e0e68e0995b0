//! # TuneStack User Service
//!
//! ```bash
//! cargo run -p tunestack-users
//! ```

use tunestack_shared::{db::pool::close_pool, http::server::serve, telemetry::init_tracing};
use tunestack_users::{
    app::{build_router, AppState},
    config, db,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("tunestack_users=debug,tunestack_shared=debug,tower_http=debug");

    tracing::info!(
        "TuneStack User Service v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = config::from_env()?;
    let address = config.bind_address();

    let pool = db::connect(&config).await?;
    let app = build_router(AppState::new(pool.clone(), config));

    serve(app, &address).await?;

    close_pool(pool).await;
    tracing::info!("User Service stopped");

    Ok(())
}
