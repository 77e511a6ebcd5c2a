//! In-process [`PlayerStore`] used by tests. Mirrors the relational id scheme.

use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicI32, Ordering},
    },
};

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::dao::{
    models::PlayerEntity,
    player_store::{BackendKind, PlayerStore},
    storage::{StorageError, StorageResult},
};

/// Map-backed store with serial keys.
#[derive(Clone, Default)]
pub struct MemoryPlayerStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    rows: RwLock<BTreeMap<i32, PlayerEntity>>,
    next_id: AtomicI32,
}

impl MemoryPlayerStore {
    /// Empty store; the first id is `1`.
    pub fn new() -> Self {
        Self::default()
    }

    fn parse(id: &str) -> StorageResult<i32> {
        id.parse::<i32>()
            .map_err(|_| StorageError::invalid_identifier(id, "a decimal integer key"))
    }
}

impl PlayerStore for MemoryPlayerStore {
    fn backend(&self) -> BackendKind {
        BackendKind::Relational
    }

    fn create(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<PlayerEntity>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let key = inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let stored = player.with_id(key.to_string());
            inner.rows.write().await.insert(key, stored.clone());
            Ok(stored)
        })
    }

    fn list(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move { Ok(inner.rows.read().await.values().cloned().collect()) })
    }

    fn get_by_id(&self, id: String) -> BoxFuture<'static, StorageResult<PlayerEntity>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let key = Self::parse(&id)?;
            inner
                .rows
                .read()
                .await
                .get(&key)
                .cloned()
                .ok_or_else(|| StorageError::not_found(key.to_string()))
        })
    }

    fn update(
        &self,
        id: String,
        player: PlayerEntity,
    ) -> BoxFuture<'static, StorageResult<PlayerEntity>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let key = Self::parse(&id)?;
            if let Some(row) = inner.rows.write().await.get_mut(&key) {
                row.name = player.name.clone();
                row.surname = player.surname.clone();
                row.balance = player.balance;
            }
            Ok(player.with_id(id))
        })
    }

    fn delete_by_id(&self, id: String) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let key = Self::parse(&id)?;
            inner.rows.write().await.remove(&key);
            Ok(())
        })
    }
}
