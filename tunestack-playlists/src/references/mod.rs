/// Cross-service reference checks
///
/// Playlists point at users (owners) and songs that live in other services.
/// Before a playlist write, the handler asks a [`UserDirectory`] and a
/// [`SongCatalog`] whether the referenced records exist.
///
/// # Implementations
///
/// - [`http`]: Calls the User and Music services over HTTP
/// - [`unchecked`]: Accepts every identifier (verification disabled)
///
/// # Outcomes
///
/// ```text
/// Ok(true)   -> record exists
/// Ok(false)  -> record is absent        (handler answers 404)
/// Err(_)     -> service unreachable or
///               answered unexpectedly   (handler answers 503)
/// ```

pub mod http;
pub mod unchecked;

use crate::config::ReferenceConfig;
use async_trait::async_trait;
use std::sync::Arc;
use tunestack_shared::error::ApiError;

pub use self::http::{HttpSongCatalog, HttpUserDirectory};
pub use self::unchecked::UncheckedReferences;

/// Reference check error types
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// The remote service could not be reached or timed out
    #[error("{service} is unreachable: {reason}")]
    Unreachable {
        service: &'static str,
        reason: String,
    },

    /// The remote service answered with a status other than 2xx or 404
    #[error("{service} answered {status} for {url}")]
    UnexpectedStatus {
        service: &'static str,
        status: u16,
        url: String,
    },
}

/// Reference check result type alias
pub type ReferenceResult<T> = Result<T, ReferenceError>;

impl From<ReferenceError> for ApiError {
    fn from(err: ReferenceError) -> Self {
        ApiError::ServiceUnavailable(err.to_string())
    }
}

/// Answers whether a user exists
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, id: i64) -> ReferenceResult<bool>;
}

/// Answers whether a song exists
#[async_trait]
pub trait SongCatalog: Send + Sync {
    async fn song_exists(&self, id: i64) -> ReferenceResult<bool>;
}

/// The pair of reference checkers held in application state
#[derive(Clone)]
pub struct References {
    pub users: Arc<dyn UserDirectory>,
    pub songs: Arc<dyn SongCatalog>,
}

impl References {
    pub fn new(users: Arc<dyn UserDirectory>, songs: Arc<dyn SongCatalog>) -> Self {
        Self { users, songs }
    }

    /// Checkers that accept every identifier
    pub fn unchecked() -> Self {
        let unchecked = Arc::new(UncheckedReferences);
        Self {
            users: unchecked.clone(),
            songs: unchecked,
        }
    }

    /// Builds the checkers described by the configuration
    ///
    /// HTTP clients when verification is on, otherwise [`References::unchecked`]
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ReferenceConfig) -> Result<Self, reqwest::Error> {
        if !config.verify {
            tracing::warn!(
                "VERIFY_REFERENCES is off: playlist owners and songs will not be checked"
            );
            return Ok(Self::unchecked());
        }

        let client = http::build_client(config.timeout())?;

        tracing::info!(
            user_service = %config.user_service_url,
            music_service = %config.music_service_url,
            timeout_secs = config.timeout_secs,
            "Reference checks enabled"
        );

        Ok(Self::new(
            Arc::new(HttpUserDirectory::new(
                client.clone(),
                &config.user_service_url,
            )),
            Arc::new(HttpSongCatalog::new(client, &config.music_service_url)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_reference_errors_map_to_503() {
        let err = ReferenceError::Unreachable {
            service: "Music Service",
            reason: "connection refused".to_string(),
        };
        let api: ApiError = err.into();
        assert_eq!(api.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = ReferenceError::UnexpectedStatus {
            service: "User Service",
            status: 500,
            url: "http://127.0.0.1:8001/users/1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "User Service answered 500 for http://127.0.0.1:8001/users/1"
        );
    }

    #[tokio::test]
    async fn test_disabled_verification_accepts_everything() {
        let config = ReferenceConfig {
            verify: false,
            ..Default::default()
        };
        let refs = References::from_config(&config).unwrap();

        assert!(refs.users.user_exists(42).await.unwrap());
        assert!(refs.songs.song_exists(-1).await.unwrap());
    }
}
