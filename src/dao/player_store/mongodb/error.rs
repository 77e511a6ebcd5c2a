use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use thiserror::Error;

use super::models::DecodeError;

/// Result alias for MongoDB operations.
pub type MongoResult<T> = Result<T, MongoDaoError>;

/// Failures raised by the MongoDB backend.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection URI could not be parsed.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// URI as configured.
        uri: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The driver rejected the parsed options.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The server never answered the startup ping.
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        /// Connection attempts made.
        attempts: u32,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The external id is not an ObjectId.
    #[error("`{id}` is not a valid ObjectId")]
    InvalidId {
        /// External identifier.
        id: String,
    },
    /// No document carries the requested id.
    #[error("player `{id}` not found")]
    NotFound {
        /// External identifier.
        id: String,
    },
    /// Inserting a player failed.
    #[error("failed to insert player")]
    CreatePlayer {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The server acknowledged an insert without an ObjectId.
    #[error("MongoDB did not report an ObjectId for the inserted player")]
    MissingInsertedId,
    /// Reading the collection failed.
    #[error("failed to list players")]
    ListPlayers {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Reading one document failed.
    #[error("failed to load player `{id}`")]
    LoadPlayer {
        /// External identifier.
        id: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A stored document does not have the player shape.
    #[error("stored player `{id}` could not be decoded")]
    DecodePlayer {
        /// External identifier.
        id: String,
        /// Offending field.
        #[source]
        source: DecodeError,
    },
    /// Updating a player failed.
    #[error("failed to update player `{id}`")]
    UpdatePlayer {
        /// External identifier.
        id: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Deleting a player failed.
    #[error("failed to delete player `{id}`")]
    DeletePlayer {
        /// External identifier.
        id: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
}

impl MongoDaoError {
    /// True when the server refused the write itself (duplicate key, document
    /// validation, ...) rather than failing to process it.
    pub fn is_write_rejection(&self) -> bool {
        match self {
            MongoDaoError::CreatePlayer { source } | MongoDaoError::UpdatePlayer { source, .. } => {
                matches!(
                    source.kind.as_ref(),
                    ErrorKind::Write(WriteFailure::WriteError(_))
                )
            }
            _ => false,
        }
    }
}
