#[cfg(test)]
pub mod memory;
/// MongoDB backend.
#[cfg(feature = "mongo-store")]
pub mod mongodb;
/// PostgreSQL backend.
#[cfg(feature = "postgres-store")]
pub mod postgres;

use std::{fmt, time::Duration};

use futures::future::BoxFuture;
use serde::Deserialize;

use crate::dao::{models::PlayerEntity, storage::StorageResult};

/// Deadline applied to single-record operations.
pub const POINT_TIMEOUT: Duration = Duration::from_secs(5);
/// Deadline applied to full-collection listing.
pub const LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Storage backend family, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// MongoDB collection with ObjectId identifiers.
    #[default]
    #[serde(alias = "mongo", alias = "mongodb")]
    Document,
    /// PostgreSQL table with serial integer identifiers.
    #[serde(alias = "postgres", alias = "postgresql")]
    Relational,
}

impl BackendKind {
    /// Interpret the `DB_TYPE` flag. Anything that does not name the relational
    /// backend selects the document store.
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "relational" => BackendKind::Relational,
            _ => BackendKind::Document,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Document => f.write_str("mongodb"),
            BackendKind::Relational => f.write_str("postgres"),
        }
    }
}

/// Uniform CRUD contract over the player collection.
///
/// Every implementation assigns identifiers itself, validates external ids
/// against its native form before touching the database, and treats updates
/// and deletes of unknown ids as successful no-ops.
pub trait PlayerStore: Send + Sync {
    /// Backend family served by this store.
    fn backend(&self) -> BackendKind;
    /// Persist a new player, ignoring any id it carries.
    fn create(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<PlayerEntity>>;
    /// Every stored player; records that fail to decode are skipped.
    fn list(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;
    /// Look a player up by its external id.
    fn get_by_id(&self, id: String) -> BoxFuture<'static, StorageResult<PlayerEntity>>;
    /// Overwrite name, surname and balance of the player with `id`.
    fn update(
        &self,
        id: String,
        player: PlayerEntity,
    ) -> BoxFuture<'static, StorageResult<PlayerEntity>>;
    /// Remove the player with `id`, succeeding when nothing matched.
    fn delete_by_id(&self, id: String) -> BoxFuture<'static, StorageResult<()>>;
}
