use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{dao::models::PlayerEntity, dto::validation::validate_not_blank};

/// Player payload accepted by create and update.
///
/// Any `id` sent by the client is accepted for compatibility but never used:
/// identifiers are assigned by the storage backend or taken from the path.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct PlayerInput {
    /// Ignored.
    #[serde(default)]
    pub id: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub surname: String,
    #[serde(default)]
    pub balance: f64,
}

impl From<PlayerInput> for PlayerEntity {
    fn from(value: PlayerInput) -> Self {
        Self {
            id: String::new(),
            name: value.name,
            surname: value.surname,
            balance: value.balance,
        }
    }
}

/// Player as returned by every player endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlayerResponse {
    /// Backend-assigned identifier: 24 hex characters on MongoDB, a decimal
    /// integer on PostgreSQL.
    pub id: String,
    pub name: String,
    pub surname: String,
    pub balance: f64,
}

impl From<PlayerEntity> for PlayerResponse {
    fn from(value: PlayerEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            surname: value.surname,
            balance: value.balance,
        }
    }
}
