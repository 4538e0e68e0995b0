/// Configuration for the Music Service
///
/// Reads `MUSIC_SERVICE_*` variables on top of the shared settings.

use tunestack_shared::config::{ServiceConfig, ServiceDefaults};

/// Defaults: port 8002, `music.db` in the working directory
pub const DEFAULTS: ServiceDefaults = ServiceDefaults {
    env_prefix: "MUSIC_SERVICE",
    port: 8002,
    database_url: "sqlite://music.db",
};

pub fn from_env() -> anyhow::Result<ServiceConfig> {
    ServiceConfig::from_env(&DEFAULTS)
}
