use tracing::info;
use validator::Validate;

use crate::{
    dao::models::PlayerEntity,
    dto::player::{PlayerInput, PlayerResponse},
    error::ServiceError,
    state::SharedState,
};

/// Every stored player, in whatever order the backend returns them.
pub async fn list_players(state: &SharedState) -> Result<Vec<PlayerResponse>, ServiceError> {
    let players = state.player_store().list().await?;
    Ok(players.into_iter().map(PlayerResponse::from).collect())
}

/// Fetch a single player by its external identifier.
pub async fn get_player(state: &SharedState, id: String) -> Result<PlayerResponse, ServiceError> {
    let player = state.player_store().get_by_id(id).await?;
    Ok(player.into())
}

/// Validate and persist a new player; the backend assigns the identifier.
pub async fn create_player(
    state: &SharedState,
    input: PlayerInput,
) -> Result<PlayerResponse, ServiceError> {
    input.validate()?;
    let entity: PlayerEntity = input.into();
    let created = state.player_store().create(entity).await?;
    info!(id = %created.id, backend = %state.backend(), "player created");
    Ok(created.into())
}

/// Overwrite name, surname and balance of the player at `id`.
pub async fn update_player(
    state: &SharedState,
    id: String,
    input: PlayerInput,
) -> Result<PlayerResponse, ServiceError> {
    input.validate()?;
    let updated = state.player_store().update(id, input.into()).await?;
    Ok(updated.into())
}

/// Remove the player at `id`; unknown ids are not an error.
pub async fn delete_player(state: &SharedState, id: String) -> Result<(), ServiceError> {
    state.player_store().delete_by_id(id.clone()).await?;
    info!(id = %id, backend = %state.backend(), "player deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{dao::player_store::memory::MemoryPlayerStore, state::AppState};

    fn state() -> SharedState {
        AppState::new(Arc::new(MemoryPlayerStore::new()))
    }

    fn input(name: &str, surname: &str, balance: f64) -> PlayerInput {
        PlayerInput {
            id: None,
            name: name.into(),
            surname: surname.into(),
            balance,
        }
    }

    #[tokio::test]
    async fn created_player_reads_back_with_same_fields() {
        let state = state();
        let created = create_player(&state, input("Ada", "Lovelace", 100.5))
            .await
            .unwrap();
        assert_eq!(created.id, "1");

        let fetched = get_player(&state, created.id.clone()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn caller_supplied_id_is_ignored_on_create() {
        let state = state();
        let mut payload = input("Ada", "Lovelace", 1.0);
        payload.id = Some("42".into());

        let created = create_player(&state, payload).await.unwrap();
        assert_eq!(created.id, "1");
        assert!(matches!(
            get_player(&state, "42".into()).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn lookups_distinguish_malformed_from_unknown_ids() {
        let state = state();
        assert!(matches!(
            get_player(&state, "abc".into()).await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            get_player(&state, "999999".into()).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_before_storage() {
        let state = state();
        let err = create_player(&state, input("", "Lovelace", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(list_players(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_is_idempotent_and_echoes_path_id() {
        let state = state();
        let created = create_player(&state, input("Ada", "Lovelace", 100.5))
            .await
            .unwrap();

        let first = update_player(&state, created.id.clone(), input("Ada", "King", 7.0))
            .await
            .unwrap();
        let after_first = get_player(&state, created.id.clone()).await.unwrap();
        let second = update_player(&state, created.id.clone(), input("Ada", "King", 7.0))
            .await
            .unwrap();
        let after_second = get_player(&state, created.id.clone()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(after_first, after_second);
        assert_eq!(after_second.surname, "King");
        assert_eq!(first.id, created.id);
    }

    #[tokio::test]
    async fn update_of_unknown_id_succeeds_without_creating() {
        let state = state();
        let updated = update_player(&state, "77".into(), input("Ghost", "Row", 0.0))
            .await
            .unwrap();
        assert_eq!(updated.id, "77");
        assert!(list_players(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let state = state();
        let created = create_player(&state, input("Ada", "Lovelace", 1.0))
            .await
            .unwrap();

        delete_player(&state, created.id.clone()).await.unwrap();
        delete_player(&state, created.id.clone()).await.unwrap();
        delete_player(&state, "12345".into()).await.unwrap();

        assert!(matches!(
            get_player(&state, created.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            delete_player(&state, "not-a-key".into()).await,
            Err(ServiceError::InvalidInput(_))
        ));
    }
}
