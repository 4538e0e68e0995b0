/// HTTP plumbing shared by every service
///
/// - `extract`: `Json`/`Path`/`Query` extractors with JSON rejections
/// - `health`: `GET /` banner and `GET /health` database probe
/// - `security`: Security headers middleware
/// - `server`: Middleware stack and graceful server loop

pub mod extract;
pub mod health;
pub mod security;
pub mod server;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain confirmation body, e.g. `{ "message": "Song 3 deleted successfully" }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
