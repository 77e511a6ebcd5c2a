use std::{error::Error, future::Future, time::Duration};

use thiserror::Error;
use tokio::time::timeout;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The client supplied identifier cannot be parsed into the backend-native form.
    #[error("invalid identifier `{id}`: expected {expected}")]
    InvalidIdentifier {
        /// Identifier as received.
        id: String,
        /// Description of the accepted form.
        expected: &'static str,
    },
    /// The identifier is well formed but no record matches it.
    #[error("player `{id}` not found")]
    NotFound {
        /// Identifier that matched nothing.
        id: String,
    },
    /// The backend refused the write.
    #[error("write rejected: {message}")]
    ConstraintViolation {
        /// Backend failure summary.
        message: String,
        /// Underlying backend error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// Connection, transport or timeout failure.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Backend failure summary.
        message: String,
        /// Underlying backend error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a constraint violation from a rejected write.
    pub fn constraint(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::ConstraintViolation {
            message,
            source: Box::new(source),
        }
    }

    /// Construct an invalid identifier error.
    pub fn invalid_identifier(id: impl Into<String>, expected: &'static str) -> Self {
        StorageError::InvalidIdentifier {
            id: id.into(),
            expected,
        }
    }

    /// Construct a not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        StorageError::NotFound { id: id.into() }
    }
}

/// Run a backend call under a deadline, reporting expiry as [`StorageError::Unavailable`].
pub async fn with_deadline<T, E, F>(operation: &'static str, limit: Duration, work: F) -> StorageResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<StorageError>,
{
    match timeout(limit, work).await {
        Ok(result) => result.map_err(Into::into),
        Err(elapsed) => Err(StorageError::unavailable(
            format!("{operation} timed out after {}ms", limit.as_millis()),
            elapsed,
        )),
    }
}
