use axum::{Json, Router, routing::get};

use crate::{dto::ping::PingResponse, state::SharedState};

#[utoipa::path(
    get,
    path = "/api/ping",
    tag = "health",
    responses((status = 200, description = "Server is running", body = PingResponse))
)]
/// Answer with `pong` without touching storage.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse::pong())
}

/// Configure the ping route.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/ping", get(ping))
}
