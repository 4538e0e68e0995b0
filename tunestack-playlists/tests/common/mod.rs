/// Common test utilities for Playlist Service integration tests
///
/// Reference checks are answered by [`StubReferences`] unless a test wires in
/// real HTTP checkers.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use std::{collections::HashSet, sync::Arc};
use tower::Service as _;
use tunestack_playlists::{
    app::{build_router, AppState},
    config::PlaylistConfig,
    db,
    references::{ReferenceError, ReferenceResult, References, SongCatalog, UserDirectory},
};

/// In-process stand-in for the User and Music services
#[derive(Debug, Default)]
pub struct StubReferences {
    users: HashSet<i64>,
    songs: HashSet<i64>,
    unreachable: bool,
}

impl StubReferences {
    pub fn new(users: impl IntoIterator<Item = i64>, songs: impl IntoIterator<Item = i64>) -> Self {
        Self {
            users: users.into_iter().collect(),
            songs: songs.into_iter().collect(),
            unreachable: false,
        }
    }

    /// Every lookup fails as if the services were down
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub fn into_references(self) -> References {
        let stub = Arc::new(self);
        References::new(stub.clone(), stub)
    }

    fn check(&self, service: &'static str, known: &HashSet<i64>, id: i64) -> ReferenceResult<bool> {
        if self.unreachable {
            return Err(ReferenceError::Unreachable {
                service,
                reason: "connection refused".to_string(),
            });
        }
        Ok(known.contains(&id))
    }
}

#[async_trait]
impl UserDirectory for StubReferences {
    async fn user_exists(&self, id: i64) -> ReferenceResult<bool> {
        self.check("User Service", &self.users, id)
    }
}

#[async_trait]
impl SongCatalog for StubReferences {
    async fn song_exists(&self, id: i64) -> ReferenceResult<bool> {
        self.check("Music Service", &self.songs, id)
    }
}

/// Test context containing a fresh database and the full router
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
}

impl TestContext {
    /// Users 1 and 2 exist; songs 1 through 5 exist
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_references(StubReferences::new([1, 2], 1..=5).into_references()).await
    }

    pub async fn with_references(references: References) -> anyhow::Result<Self> {
        let config = PlaylistConfig::for_tests();
        let db = db::connect(&config.service).await?;
        let app = build_router(AppState::new(db.clone(), config, references));

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

    /// Creates a playlist and returns its ID, asserting 201
    pub async fn create_playlist(&self, body: Value) -> i64 {
        let (status, created) = self.send("POST", "/playlists", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
        created["id"].as_i64().expect("generated id")
    }
}

/// Serves a router on an ephemeral loopback port and returns its base URL
pub async fn spawn_service(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}")
}
