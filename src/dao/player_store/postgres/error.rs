//! Error types shared by the PostgreSQL storage implementation.

use sqlx::error::{Error as SqlxError, ErrorKind};
use thiserror::Error;

/// Convenient result alias returning [`PostgresDaoError`] failures.
pub type PostgresResult<T> = Result<T, PostgresDaoError>;

/// Failures that can occur while interacting with PostgreSQL.
#[derive(Debug, Error)]
pub enum PostgresDaoError {
    /// The pool never managed to open a connection.
    #[error("PostgreSQL connection failed after {attempts} attempt(s)")]
    Connect {
        /// Connection attempts made.
        attempts: u32,
        /// Driver error.
        #[source]
        source: SqlxError,
    },
    /// Creating the `players` table failed.
    #[error("failed to ensure table `{table}`")]
    EnsureTable {
        /// Table being created.
        table: &'static str,
        /// Driver error.
        #[source]
        source: SqlxError,
    },
    /// The external id is not a serial key.
    #[error("`{id}` is not a valid player key")]
    InvalidId {
        /// External identifier.
        id: String,
    },
    /// No row carries the requested key.
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
        source: SqlxError,
    },
    /// Reading the table failed.
    #[error("failed to list players")]
    ListPlayers {
        /// Driver error.
        #[source]
        source: SqlxError,
    },
    /// Reading one row failed.
    #[error("failed to load player `{id}`")]
    LoadPlayer {
        /// External identifier.
        id: String,
        /// Driver error.
        #[source]
        source: SqlxError,
    },
    /// Updating a player failed.
    #[error("failed to update player `{id}`")]
    UpdatePlayer {
        /// External identifier.
        id: String,
        /// Driver error.
        #[source]
        source: SqlxError,
    },
    /// Deleting a player failed.
    #[error("failed to delete player `{id}`")]
    DeletePlayer {
        /// External identifier.
        id: String,
        /// Driver error.
        #[source]
        source: SqlxError,
    },
}

impl PostgresDaoError {
    /// True when the database refused the statement because of a table constraint.
    pub fn is_constraint_violation(&self) -> bool {
        let source = match self {
            PostgresDaoError::CreatePlayer { source }
            | PostgresDaoError::UpdatePlayer { source, .. } => source,
            _ => return false,
        };

        match source {
            SqlxError::Database(db) => matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ),
            _ => false,
        }
    }
}
