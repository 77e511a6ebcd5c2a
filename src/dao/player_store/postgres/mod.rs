mod config;
mod error;
mod models;
/// [`PostgresPlayerStore`] and its queries.
pub mod store;

pub use config::PostgresConfig;
pub use error::PostgresDaoError;
pub use store::PostgresPlayerStore;

use crate::dao::storage::StorageError;

use self::models::SERIAL_KEY_FORM;

impl From<PostgresDaoError> for StorageError {
    fn from(err: PostgresDaoError) -> Self {
        match err {
            PostgresDaoError::InvalidId { id } => {
                StorageError::invalid_identifier(id, SERIAL_KEY_FORM)
            }
            PostgresDaoError::NotFound { id } => StorageError::not_found(id),
            err if err.is_constraint_violation() => StorageError::constraint(err.to_string(), err),
            err => StorageError::unavailable(err.to_string(), err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_errors_keep_their_kind() {
        let err: StorageError = PostgresDaoError::InvalidId { id: "abc".into() }.into();
        assert!(matches!(err, StorageError::InvalidIdentifier { ref id, .. } if id == "abc"));

        let err: StorageError = PostgresDaoError::NotFound { id: "999999".into() }.into();
        assert!(matches!(err, StorageError::NotFound { ref id } if id == "999999"));
    }

    #[test]
    fn transport_failures_report_unavailable() {
        let err: StorageError = PostgresDaoError::ListPlayers {
            source: sqlx::Error::PoolTimedOut,
        }
        .into();
        assert!(matches!(err, StorageError::Unavailable { .. }));

        let err: StorageError = PostgresDaoError::CreatePlayer {
            source: sqlx::Error::PoolClosed,
        }
        .into();
        assert!(matches!(err, StorageError::Unavailable { .. }));
    }
}
