use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the player API.
#[openapi(
    paths(
        crate::routes::ping::ping,
        crate::routes::players::list_players,
        crate::routes::players::get_player,
        crate::routes::players::create_player,
        crate::routes::players::update_player,
        crate::routes::players::delete_player,
    ),
    components(
        schemas(
            crate::dto::ping::PingResponse,
            crate::dto::player::PlayerInput,
            crate::dto::player::PlayerResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness endpoints"),
        (name = "players", description = "Player CRUD"),
    )
)]
pub struct ApiDoc;
