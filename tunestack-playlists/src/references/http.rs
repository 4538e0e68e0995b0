/// HTTP reference checkers
///
/// `GET {base}/users/{id}` and `GET {base}/songs/{id}` against the User and
/// Music services. 2xx means the record exists, 404 means it doesn't, and
/// anything else is reported as [`ReferenceError`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use tunestack_playlists::references::{http::build_client, HttpSongCatalog, SongCatalog};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = build_client(Duration::from_secs(5))?;
/// let catalog = HttpSongCatalog::new(client, "http://127.0.0.1:8002");
///
/// if catalog.song_exists(7).await? {
///     println!("song 7 is in the catalog");
/// }
/// # Ok(())
/// # }
/// ```

use super::{ReferenceError, ReferenceResult, SongCatalog, UserDirectory};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Builds the shared client used for reference checks
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("tunestack-playlists/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Looks up users in the User Service
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: Client,
    base_url: String,
}

impl HttpUserDirectory {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn user_exists(&self, id: i64) -> ReferenceResult<bool> {
        let url = format!("{}/users/{}", self.base_url, id);
        resource_exists(&self.client, "User Service", url).await
    }
}

/// Looks up songs in the Music Service
#[derive(Debug, Clone)]
pub struct HttpSongCatalog {
    client: Client,
    base_url: String,
}

impl HttpSongCatalog {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SongCatalog for HttpSongCatalog {
    async fn song_exists(&self, id: i64) -> ReferenceResult<bool> {
        let url = format!("{}/songs/{}", self.base_url, id);
        resource_exists(&self.client, "Music Service", url).await
    }
}

async fn resource_exists(
    client: &Client,
    service: &'static str,
    url: String,
) -> ReferenceResult<bool> {
    let response = client.get(&url).send().await.map_err(|e| {
        tracing::warn!(service, url = %url, error = %e, "Reference check failed");
        ReferenceError::Unreachable {
            service,
            reason: e.to_string(),
        }
    })?;

    let status = response.status();
    tracing::debug!(service, url = %url, status = status.as_u16(), "Reference check");

    if status.is_success() {
        Ok(true)
    } else if status == StatusCode::NOT_FOUND {
        Ok(false)
    } else {
        Err(ReferenceError::UnexpectedStatus {
            service,
            status: status.as_u16(),
            url,
        })
    }
}
