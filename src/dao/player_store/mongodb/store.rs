use futures::{Stream, TryStreamExt, future::BoxFuture};
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    error::Result as DriverResult,
};
use tracing::{debug, warn};

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoPlayerDocument, describe_id, doc_id, parse_object_id},
};
use crate::dao::{
    models::PlayerEntity,
    player_store::{BackendKind, LIST_TIMEOUT, POINT_TIMEOUT, PlayerStore},
    storage::{StorageResult, with_deadline},
};

const PLAYER_COLLECTION_NAME: &str = "players";

/// MongoDB-backed [`PlayerStore`] implementation.
///
/// Documents are read as raw BSON so a single malformed record cannot poison a
/// whole listing.
#[derive(Clone)]
pub struct MongoPlayerStore {
    collection: Collection<Document>,
}

impl MongoPlayerStore {
    /// Establish a connection to MongoDB and bind the players collection.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (_client, database) =
            establish_connection(&config.options, &config.database_name).await?;
        Ok(Self::from_database(&database))
    }

    /// Bind the players collection of an already connected database.
    pub fn from_database(database: &Database) -> Self {
        Self {
            collection: database.collection::<Document>(PLAYER_COLLECTION_NAME),
        }
    }

    async fn insert(&self, player: PlayerEntity) -> MongoResult<PlayerEntity> {
        let result = self
            .collection
            .insert_one(MongoPlayerDocument::fields(&player))
            .await
            .map_err(|source| MongoDaoError::CreatePlayer { source })?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or(MongoDaoError::MissingInsertedId)?;

        Ok(player.with_id(id.to_hex()))
    }

    async fn find_all(&self) -> MongoResult<Vec<PlayerEntity>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|source| MongoDaoError::ListPlayers { source })?;

        let listing = decode_listing(cursor).await?;
        if listing.skipped > 0 {
            warn!(
                skipped = listing.skipped,
                returned = listing.players.len(),
                collection = PLAYER_COLLECTION_NAME,
                "player listing omitted undecodable documents"
            );
        }

        Ok(listing.players)
    }

    async fn find_one(&self, id: String) -> MongoResult<PlayerEntity> {
        let oid = parse_object_id(&id)?;
        let document = self
            .collection
            .find_one(doc_id(oid))
            .await
            .map_err(|source| MongoDaoError::LoadPlayer {
                id: id.clone(),
                source,
            })?
            .ok_or_else(|| MongoDaoError::NotFound { id: oid.to_hex() })?;

        let decoded = MongoPlayerDocument::try_from(document)
            .map_err(|source| MongoDaoError::DecodePlayer { id, source })?;

        // Re-derive the external id from the stored ObjectId.
        Ok(decoded.into())
    }

    async fn replace_fields(&self, id: String, player: PlayerEntity) -> MongoResult<PlayerEntity> {
        let oid = parse_object_id(&id)?;
        let result = self
            .collection
            .update_one(
                doc_id(oid),
                doc! { "$set": MongoPlayerDocument::fields(&player) },
            )
            .await
            .map_err(|source| MongoDaoError::UpdatePlayer {
                id: id.clone(),
                source,
            })?;

        debug!(id = %id, matched = result.matched_count, "player update applied");
        Ok(player.with_id(id))
    }

    async fn remove(&self, id: String) -> MongoResult<()> {
        let oid = parse_object_id(&id)?;
        let result = self
            .collection
            .delete_one(doc_id(oid))
            .await
            .map_err(|source| MongoDaoError::DeletePlayer { id: id.clone(), source })?;

        debug!(id = %id, deleted = result.deleted_count, "player delete applied");
        Ok(())
    }
}

/// Players decoded from a listing, plus how many documents were dropped.
struct Listing {
    players: Vec<PlayerEntity>,
    skipped: usize,
}

// Transport errors abort the listing; shape errors only drop the document.
async fn decode_listing<S>(mut documents: S) -> MongoResult<Listing>
where
    S: Stream<Item = DriverResult<Document>> + Unpin,
{
    let mut listing = Listing {
        players: Vec::new(),
        skipped: 0,
    };

    while let Some(document) = documents
        .try_next()
        .await
        .map_err(|source| MongoDaoError::ListPlayers { source })?
    {
        let id = describe_id(&document);
        match MongoPlayerDocument::try_from(document) {
            Ok(decoded) => listing.players.push(decoded.into()),
            Err(err) => {
                listing.skipped += 1;
                warn!(id = %id, error = %err, "skipping undecodable player document");
            }
        }
    }

    Ok(listing)
}

impl PlayerStore for MongoPlayerStore {
    fn backend(&self) -> BackendKind {
        BackendKind::Document
    }

    fn create(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<PlayerEntity>> {
        let store = self.clone();
        Box::pin(async move { with_deadline("create player", POINT_TIMEOUT, store.insert(player)).await })
    }

    fn list(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { with_deadline("list players", LIST_TIMEOUT, store.find_all()).await })
    }

    fn get_by_id(&self, id: String) -> BoxFuture<'static, StorageResult<PlayerEntity>> {
        let store = self.clone();
        Box::pin(async move { with_deadline("get player", POINT_TIMEOUT, store.find_one(id)).await })
    }

    fn update(
        &self,
        id: String,
        player: PlayerEntity,
    ) -> BoxFuture<'static, StorageResult<PlayerEntity>> {
        let store = self.clone();
        Box::pin(async move {
            with_deadline("update player", POINT_TIMEOUT, store.replace_fields(id, player)).await
        })
    }

    fn delete_by_id(&self, id: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { with_deadline("delete player", POINT_TIMEOUT, store.remove(id)).await })
    }
}
