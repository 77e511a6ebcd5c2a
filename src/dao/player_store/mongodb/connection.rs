use mongodb::{Client, Database, bson::doc, options::ClientOptions};

use crate::dao::connection::retry_connect;

use super::error::{MongoDaoError, MongoResult};

/// Build a client and wait until the server answers a ping.
pub async fn establish_connection(
    options: &ClientOptions,
    database_name: &str,
) -> MongoResult<(Client, Database)> {
    let client = Client::with_options(options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(database_name);

    let handle = &database;
    retry_connect("mongodb", || async move { handle.run_command(doc! { "ping": 1 }).await })
        .await
        .map_err(|(attempts, source)| MongoDaoError::InitialPing { attempts, source })?;

    Ok((client, database))
}
