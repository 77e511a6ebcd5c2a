use serde::Serialize;
use utoipa::ToSchema;

/// Liveness payload returned by the `/api/ping` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct PingResponse {
    /// Always "pong".
    pub message: String,
}

impl PingResponse {
    pub fn pong() -> Self {
        Self {
            message: "pong".to_string(),
        }
    }
}
