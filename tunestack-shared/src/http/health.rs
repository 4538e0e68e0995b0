/// Health check endpoints
///
/// Every service answers two unauthenticated probes:
///
/// ```text
/// GET /        -> { "service": "User Service", "status": "running", "version": "0.1.0" }
/// GET /health  -> { "status": "healthy", "version": "0.1.0", "database": "connected" }
/// ```
///
/// The handlers pull the pool and the service identity out of the router
/// state through [`FromRef`], so any service state that exposes both can
/// mount [`health_routes`].

use axum::{
    extract::{FromRef, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

/// Identity of the running service
#[derive(Debug, Clone, Copy)]
pub struct ServiceInfo {
    /// Human-readable service name (e.g. "Music Service")
    pub name: &'static str,

    /// Service version
    pub version: &'static str,
}

/// `GET /` response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceBanner {
    /// Service name
    pub service: String,

    /// Always "running" when the process answers
    pub status: String,

    /// Service version
    pub version: String,
}

/// `GET /health` response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    /// Application version
    pub version: String,

    /// "connected" or "disconnected"
    pub database: String,
}

/// Service banner handler
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service is running", body = ServiceBanner))
)]
pub async fn root(State(info): State<ServiceInfo>) -> Json<ServiceBanner> {
    Json(ServiceBanner {
        service: info.name.to_string(),
        status: "running".to_string(),
        version: info.version.to_string(),
    })
}

/// Health check handler
///
/// Reports "degraded" with status 200 when the database does not answer, so
/// load balancers can tell a sick service from a dead one.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Health status", body = HealthResponse))
)]
pub async fn health_check(
    State(db): State<SqlitePool>,
    State(info): State<ServiceInfo>,
) -> Json<HealthResponse> {
    let database_status = match crate::db::pool::health_check(&db).await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: if database_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: info.version.to_string(),
        database: database_status.to_string(),
    })
}

/// Router with `/` and `/health`
pub fn health_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    SqlitePool: FromRef<S>,
    ServiceInfo: FromRef<S>,
{
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
