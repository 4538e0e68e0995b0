/// Middleware stack and server loop
///
/// Services build their own routes, then hand the stateful router to
/// [`apply_middleware`] and the result to [`serve`].
///
/// # Middleware Stack
///
/// Applied in order (innermost first):
/// 1. Request tracing (tower-http `TraceLayer`)
/// 2. CORS (tower-http `CorsLayer`)
/// 3. Security headers

use crate::{config::ApiConfig, http::security::SecurityHeadersLayer};
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Wraps a router with tracing, CORS and security headers
pub fn apply_middleware(router: Router, api: &ApiConfig) -> Router {
    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&api.cors_origins))
        .layer(SecurityHeadersLayer::new(api.production))
}

/// CORS policy from the configured origin list
///
/// `*` anywhere in the list yields a permissive policy for development.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// Binds `address` and serves `app` until Ctrl-C
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(app: Router, address: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(address).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when the process receives Ctrl-C
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, draining connections..."),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::Request, http::StatusCode, routing::get};
    use tower::Service as _;

    fn api_config(origins: &[&str]) -> ApiConfig {
        ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            production: false,
        }
    }

    #[tokio::test]
    async fn test_configured_origin_is_echoed() {
        let app = apply_middleware(
            Router::new().route("/", get(|| async { "ok" })),
            &api_config(&["http://player.test"]),
        );

        let response = app
            .clone()
            .call(
                Request::builder()
                    .uri("/")
                    .header("origin", "http://player.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "http://player.test"
        );
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    }

    #[tokio::test]
    async fn test_unknown_origin_gets_no_cors_header() {
        let app = apply_middleware(
            Router::new().route("/", get(|| async { "ok" })),
            &api_config(&["http://player.test"]),
        );

        let response = app
            .clone()
            .call(
                Request::builder()
                    .uri("/")
                    .header("origin", "http://evil.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }
}
