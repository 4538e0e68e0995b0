/// Configuration for the Playlist Service
///
/// Reads `PLAYLIST_SERVICE_*` variables on top of the shared settings, plus
/// the locations of the services playlists refer to.
///
/// # Environment Variables
///
/// - `USER_SERVICE_URL`: User Service base URL (default: http://127.0.0.1:8001)
/// - `MUSIC_SERVICE_URL`: Music Service base URL (default: http://127.0.0.1:8002)
/// - `VERIFY_REFERENCES`: Check owners and songs before writes (default: true)
/// - `REFERENCE_TIMEOUT_SECS`: Timeout for each check (default: 5)

use serde::{Deserialize, Serialize};
use std::{env, time::Duration};
use tunestack_shared::config::{parse_bool, ServiceConfig, ServiceDefaults};

/// Defaults: port 8003, `playlists.db` in the working directory
pub const DEFAULTS: ServiceDefaults = ServiceDefaults {
    env_prefix: "PLAYLIST_SERVICE",
    port: 8003,
    database_url: "sqlite://playlists.db",
};

/// Complete Playlist Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// HTTP server and database settings
    pub service: ServiceConfig,

    /// Cross-service reference checks
    pub references: ReferenceConfig,
}

/// Where and how to verify playlist owners and songs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    pub user_service_url: String,
    pub music_service_url: String,

    /// When false, every owner and song is accepted
    pub verify: bool,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            user_service_url: "http://127.0.0.1:8001".to_string(),
            music_service_url: "http://127.0.0.1:8002".to_string(),
            verify: true,
            timeout_secs: 5,
        }
    }
}

impl ReferenceConfig {
    /// Loads reference settings from the environment
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let timeout_secs = match env::var("REFERENCE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("REFERENCE_TIMEOUT_SECS is invalid: {e}"))?,
            Err(_) => defaults.timeout_secs,
        };

        if timeout_secs == 0 {
            anyhow::bail!("REFERENCE_TIMEOUT_SECS must be at least 1");
        }

        Ok(Self {
            user_service_url: env::var("USER_SERVICE_URL").unwrap_or(defaults.user_service_url),
            music_service_url: env::var("MUSIC_SERVICE_URL")
                .unwrap_or(defaults.music_service_url),
            verify: parse_bool(
                "VERIFY_REFERENCES",
                env::var("VERIFY_REFERENCES").ok(),
                defaults.verify,
            )?,
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PlaylistConfig {
    /// Test configuration: in-memory database, verification via injected checkers
    pub fn for_tests() -> Self {
        Self {
            service: ServiceConfig::for_tests(),
            references: ReferenceConfig::default(),
        }
    }
}

/// Loads the Playlist Service configuration from the environment
///
/// `.env` is loaded by [`ServiceConfig::from_env`] before the reference
/// variables are read.
pub fn from_env() -> anyhow::Result<PlaylistConfig> {
    let service = ServiceConfig::from_env(&DEFAULTS)?;
    let references = ReferenceConfig::from_env()?;

    Ok(PlaylistConfig {
        service,
        references,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let config = ReferenceConfig::default();
        assert_eq!(config.user_service_url, "http://127.0.0.1:8001");
        assert_eq!(config.music_service_url, "http://127.0.0.1:8002");
        assert!(config.verify);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_service_defaults() {
        assert_eq!(DEFAULTS.port, 8003);
        assert_eq!(DEFAULTS.env_prefix, "PLAYLIST_SERVICE");
    }
}
