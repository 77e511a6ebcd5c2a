use futures::future::BoxFuture;
use sqlx::{FromRow, PgPool};
use tracing::{debug, warn};

use super::{
    config::PostgresConfig,
    error::{PostgresDaoError, PostgresResult},
    models::{PostgresPlayerRow, parse_key},
};
use crate::dao::{
    connection::retry_connect,
    models::PlayerEntity,
    player_store::{BackendKind, LIST_TIMEOUT, POINT_TIMEOUT, PlayerStore},
    storage::{StorageResult, with_deadline},
};

const PLAYER_TABLE_NAME: &str = "players";

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS players (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        surname TEXT NOT NULL,
        balance DOUBLE PRECISION NOT NULL
    )
"#;

/// PostgreSQL-backed [`PlayerStore`] implementation over a shared pool.
#[derive(Clone)]
pub struct PostgresPlayerStore {
    pool: PgPool,
}

impl PostgresPlayerStore {
    /// Open the pool and make sure the `players` table exists.
    pub async fn connect(config: PostgresConfig) -> PostgresResult<Self> {
        let pool = retry_connect("postgres", || config.pool_options().connect(&config.url))
            .await
            .map_err(|(attempts, source)| PostgresDaoError::Connect { attempts, source })?;

        let store = Self { pool };
        store.ensure_table().await?;
        Ok(store)
    }

    /// Create the table when absent. Runs once at startup, never per operation.
    pub async fn ensure_table(&self) -> PostgresResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|source| PostgresDaoError::EnsureTable {
                table: PLAYER_TABLE_NAME,
                source,
            })?;
        Ok(())
    }

    async fn insert(&self, player: PlayerEntity) -> PostgresResult<PlayerEntity> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO players (name, surname, balance) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&player.name)
        .bind(&player.surname)
        .bind(player.balance)
        .fetch_one(&self.pool)
        .await
        .map_err(|source| PostgresDaoError::CreatePlayer { source })?;

        Ok(player.with_id(id.to_string()))
    }

    async fn find_all(&self) -> PostgresResult<Vec<PlayerEntity>> {
        let rows = sqlx::query("SELECT id, name, surname, balance FROM players")
            .fetch_all(&self.pool)
            .await
            .map_err(|source| PostgresDaoError::ListPlayers { source })?;

        let mut players = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;
        for row in &rows {
            match PostgresPlayerRow::from_row(row) {
                Ok(decoded) => players.push(decoded.into()),
                Err(err) => {
                    skipped += 1;
                    warn!(error = %err, "skipping undecodable player row");
                }
            }
        }

        if skipped > 0 {
            warn!(
                skipped,
                returned = players.len(),
                table = PLAYER_TABLE_NAME,
                "player listing omitted undecodable rows"
            );
        }

        Ok(players)
    }

    async fn find_one(&self, id: String) -> PostgresResult<PlayerEntity> {
        let key = parse_key(&id)?;
        let row = sqlx::query_as::<_, PostgresPlayerRow>(
            "SELECT id, name, surname, balance FROM players WHERE id = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|source| PostgresDaoError::LoadPlayer {
            id: id.clone(),
            source,
        })?;

        match row {
            Some(row) => Ok(row.into()),
            None => Err(PostgresDaoError::NotFound { id: key.to_string() }),
        }
    }

    async fn replace_fields(&self, id: String, player: PlayerEntity) -> PostgresResult<PlayerEntity> {
        let key = parse_key(&id)?;
        let result = sqlx::query(
            "UPDATE players SET name = $1, surname = $2, balance = $3 WHERE id = $4",
        )
        .bind(&player.name)
        .bind(&player.surname)
        .bind(player.balance)
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(|source| PostgresDaoError::UpdatePlayer {
            id: id.clone(),
            source,
        })?;

        debug!(id = %id, matched = result.rows_affected(), "player update applied");
        Ok(player.with_id(id))
    }

    async fn remove(&self, id: String) -> PostgresResult<()> {
        let key = parse_key(&id)?;
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|source| PostgresDaoError::DeletePlayer { id: id.clone(), source })?;

        debug!(id = %id, deleted = result.rows_affected(), "player delete applied");
        Ok(())
    }
}

impl PlayerStore for PostgresPlayerStore {
    fn backend(&self) -> BackendKind {
        BackendKind::Relational
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
