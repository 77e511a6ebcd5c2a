mod config;
mod connection;
mod error;
mod models;
/// [`MongoPlayerStore`] and its queries.
pub mod store;

pub use config::MongoConfig;
pub use error::MongoDaoError;
pub use store::MongoPlayerStore;

use crate::dao::storage::StorageError;

use self::models::OBJECT_ID_FORM;

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        match err {
            MongoDaoError::InvalidId { id } => StorageError::invalid_identifier(id, OBJECT_ID_FORM),
            MongoDaoError::NotFound { id } => StorageError::not_found(id),
            err if err.is_write_rejection() => StorageError::constraint(err.to_string(), err),
            err => StorageError::unavailable(err.to_string(), err),
        }
    }
}
