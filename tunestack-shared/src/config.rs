/// Configuration shared by every service
///
/// Each service reads its settings from environment variables under its own
/// prefix, so the three binaries can run side by side from one `.env` file.
///
/// # Environment Variables
///
/// With `{P}` being `USER_SERVICE`, `MUSIC_SERVICE` or `PLAYLIST_SERVICE`:
///
/// - `{P}_HOST`: Host to bind to (default: 0.0.0.0)
/// - `{P}_PORT`: Port to bind to (service-specific default)
/// - `{P}_DATABASE_URL`: SQLite URL (service-specific default)
/// - `{P}_DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `PRODUCTION`: Enables HSTS when `true` (default: false)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use tunestack_shared::config::{ServiceConfig, ServiceDefaults};
///
/// # fn example() -> anyhow::Result<()> {
/// let config = ServiceConfig::from_env(&ServiceDefaults {
///     env_prefix: "USER_SERVICE",
///     port: 8001,
///     database_url: "sqlite://users.db",
/// })?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use crate::db::pool::DatabaseConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Per-service defaults used when the environment is silent
#[derive(Debug, Clone, Copy)]
pub struct ServiceDefaults {
    /// Prefix for service-specific variables (e.g. "MUSIC_SERVICE")
    pub env_prefix: &'static str,

    /// Default listening port
    pub port: u16,

    /// Default SQLite URL
    pub database_url: &'static str,
}

/// Complete service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DbSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` allows any)
    pub cors_origins: Vec<String>,

    /// Production mode (turns on HSTS)
    pub production: bool,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbSettings {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

impl ServiceConfig {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable has an invalid value.
    pub fn from_env(defaults: &ServiceDefaults) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let prefix = defaults.env_prefix;

        let host = env::var(format!("{prefix}_HOST")).unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var(format!("{prefix}_PORT"))
            .unwrap_or_else(|_| defaults.port.to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("{prefix}_PORT is not a valid port: {e}"))?;

        let database_url = env::var(format!("{prefix}_DATABASE_URL"))
            .unwrap_or_else(|_| defaults.database_url.to_string());

        let max_connections = env::var(format!("{prefix}_DATABASE_MAX_CONNECTIONS"))
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("{prefix}_DATABASE_MAX_CONNECTIONS is invalid: {e}"))?;

        if max_connections == 0 {
            anyhow::bail!("{prefix}_DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));
        let production = parse_bool("PRODUCTION", env::var("PRODUCTION").ok(), false)?;

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            database: DbSettings {
                url: database_url,
                max_connections,
            },
        })
    }

    /// Configuration for tests: in-memory database, permissive CORS
    pub fn for_tests() -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            database: DbSettings {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
        }
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Pool configuration derived from these settings
    pub fn pool_config(&self) -> DatabaseConfig {
        let config = DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            ..Default::default()
        };

        if config.is_in_memory() {
            DatabaseConfig {
                url: config.url,
                ..DatabaseConfig::in_memory()
            }
        } else {
            config
        }
    }
}

/// Splits a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a boolean flag (`true/false/1/0/yes/no`), falling back to `default` when unset
pub fn parse_bool(name: &str, value: Option<String>, default: bool) -> anyhow::Result<bool> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("{name} must be a boolean, got {v:?}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let mut config = ServiceConfig::for_tests();
        config.api.port = 8002;
        assert_eq!(config.bind_address(), "127.0.0.1:8002");
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_parse_bool() {
        assert!(!parse_bool("X", None, false).unwrap());
        assert!(parse_bool("X", None, true).unwrap());
        assert!(parse_bool("X", Some("TRUE".into()), false).unwrap());
        assert!(!parse_bool("X", Some("0".into()), true).unwrap());
        assert!(parse_bool("X", Some("maybe".into()), true).is_err());
    }

    #[test]
    fn test_pool_config_for_memory_url() {
        let pool = ServiceConfig::for_tests().pool_config();
        assert!(pool.is_in_memory());
        assert_eq!(pool.max_connections, 1);
        assert_eq!(pool.idle_timeout_secs, None);
    }

    #[test]
    fn test_pool_config_for_file_url() {
        let mut config = ServiceConfig::for_tests();
        config.database.url = "sqlite://music.db".to_string();
        config.database.max_connections = 4;

        let pool = config.pool_config();
        assert_eq!(pool.url, "sqlite://music.db");
        assert_eq!(pool.max_connections, 4);
        assert_eq!(pool.idle_timeout_secs, Some(600));
    }
}
