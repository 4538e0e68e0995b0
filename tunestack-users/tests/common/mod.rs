/// Common test utilities for User Service integration tests
///
/// Each test gets its own in-memory database and router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::Service as _;
use tunestack_shared::config::ServiceConfig;
use tunestack_users::{
    app::{build_router, AppState},
    db,
};

/// Test context containing a fresh database and the full router
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
}

impl TestContext {
    /// Creates a new context with migrated in-memory storage
    pub async fn new() -> anyhow::Result<Self> {
        let config = ServiceConfig::for_tests();
        let db = db::connect(&config).await?;
        let app = build_router(AppState::new(db.clone(), config));

        Ok(Self { db, app })
    }

    /// Sends a request with an optional JSON body and decodes the JSON reply
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Registers a user and returns the response body, asserting 201
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Value {
        let (status, body) = self
            .send(
                "POST",
                "/users/register",
                Some(serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body
    }
}
