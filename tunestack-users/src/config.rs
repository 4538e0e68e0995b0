/// Configuration for the User Service
///
/// Reads `USER_SERVICE_*` variables on top of the shared settings; see
/// [`tunestack_shared::config`] for the full list.

use tunestack_shared::config::{ServiceConfig, ServiceDefaults};

/// Defaults: port 8001, `users.db` in the working directory
pub const DEFAULTS: ServiceDefaults = ServiceDefaults {
    env_prefix: "USER_SERVICE",
    port: 8001,
    database_url: "sqlite://users.db",
};

/// Loads the User Service configuration from the environment
pub fn from_env() -> anyhow::Result<ServiceConfig> {
    ServiceConfig::from_env(&DEFAULTS)
}
