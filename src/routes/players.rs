use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::player::{PlayerInput, PlayerResponse},
    error::AppError,
    services::player_service,
    state::SharedState,
};

/// Player CRUD routes, mounted under `/api`.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/players", get(list_players).post(create_player))
        .route(
            "/players/{id}",
            get(get_player).put(update_player).delete(delete_player),
        )
}

/// List every stored player.
#[utoipa::path(
    get,
    path = "/api/players",
    tag = "players",
    responses(
        (status = 200, description = "All players", body = [PlayerResponse]),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_players(
    State(state): State<SharedState>,
) -> Result<Json<Vec<PlayerResponse>>, AppError> {
    let players = player_service::list_players(&state).await?;
    Ok(Json(players))
}

/// Fetch one player.
#[utoipa::path(
    get,
    path = "/api/players/{id}",
    tag = "players",
    params(("id" = String, Path, description = "Backend-assigned player identifier")),
    responses(
        (status = 200, description = "Player found", body = PlayerResponse),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "No player with this identifier")
    )
)]
pub async fn get_player(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerResponse>, AppError> {
    let player = player_service::get_player(&state, id).await?;
    Ok(Json(player))
}

/// Create a player; any `id` in the body is ignored.
#[utoipa::path(
    post,
    path = "/api/players",
    tag = "players",
    request_body = PlayerInput,
    responses(
        (status = 201, description = "Player created", body = PlayerResponse),
        (status = 400, description = "Malformed or invalid body"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_player(
    State(state): State<SharedState>,
    payload: Result<Json<PlayerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<PlayerResponse>), AppError> {
    let Json(input) = payload?;
    let player = player_service::create_player(&state, input).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// Overwrite name, surname and balance of a player.
#[utoipa::path(
    put,
    path = "/api/players/{id}",
    tag = "players",
    params(("id" = String, Path, description = "Backend-assigned player identifier")),
    request_body = PlayerInput,
    responses(
        (status = 200, description = "Player written", body = PlayerResponse),
        (status = 400, description = "Malformed identifier or body"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn update_player(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<PlayerInput>, JsonRejection>,
) -> Result<Json<PlayerResponse>, AppError> {
    let Json(input) = payload?;
    let player = player_service::update_player(&state, id, input).await?;
    Ok(Json(player))
}

/// Delete a player; deleting an unknown identifier succeeds.
#[utoipa::path(
    delete,
    path = "/api/players/{id}",
    tag = "players",
    params(("id" = String, Path, description = "Backend-assigned player identifier")),
    responses(
        (status = 204, description = "Player removed or never existed"),
        (status = 400, description = "Malformed identifier"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn delete_player(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    player_service::delete_player(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
