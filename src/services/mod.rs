/// OpenAPI documentation generation.
pub mod documentation;
/// Periodic liveness event.
pub mod heartbeat;
/// Player CRUD orchestration between routes and the store.
pub mod player_service;
