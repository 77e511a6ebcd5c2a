use sqlx::FromRow;

use crate::dao::models::PlayerEntity;

use super::error::{PostgresDaoError, PostgresResult};

/// Human readable description of the identifier form, used in error messages.
pub const SERIAL_KEY_FORM: &str = "a decimal integer key";

/// Row shape of the `players` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PostgresPlayerRow {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub balance: f64,
}

impl From<PostgresPlayerRow> for PlayerEntity {
    fn from(value: PostgresPlayerRow) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            surname: value.surname,
            balance: value.balance,
        }
    }
}

/// Decode an external identifier into the `SERIAL` key it renders.
pub fn parse_key(id: &str) -> PostgresResult<i32> {
    id.parse::<i32>()
        .map_err(|_| PostgresDaoError::InvalidId { id: id.to_owned() })
}
