/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use tunestack_users::{app::{build_router, AppState}, config, db};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = config::from_env()?;
/// let pool = db::connect(&config).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8001").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{docs, routes};
use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
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
///
/// Cloned into every handler through axum's `State` extractor.
#[derive(Clone, FromRef)]
pub struct AppState {
    /// Users database
    pub db: SqlitePool,

    /// Service configuration
    pub config: Arc<ServiceConfig>,

    /// Name and version reported by `/` and `/health`
    pub info: ServiceInfo,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: ServiceConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
            info: ServiceInfo {
                name: "User Service",
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

/// Builds the complete router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /                  # Service banner
/// ├── GET    /health            # Health check
/// ├── GET    /docs              # Swagger UI
/// ├── POST   /users/register
/// ├── POST   /users/login
/// ├── GET    /users
/// ├── GET    /users/:id
/// └── DELETE /users/:id
/// ```
pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/users", get(routes::users::list_users))
        .route("/users/register", post(routes::users::register))
        .route("/users/login", post(routes::users::login))
        .route(
            "/users/:id",
            get(routes::users::get_user).delete(routes::users::delete_user),
        );

    let router = Router::new()
        .merge(health_routes())
        .merge(user_routes)
        .merge(docs::docs_routes())
        .with_state(state.clone());

    apply_middleware(router, &state.config.api)
}
