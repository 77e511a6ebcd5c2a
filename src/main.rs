//! Contoso Back binary entrypoint wiring configuration, storage, REST routes and logging.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use contoso_back::{
    config::AppConfig,
    dao::player_store::{BackendKind, PlayerStore},
    routes,
    services::heartbeat,
    state::{AppState, SharedState},
    telemetry,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    info!(event = "startup", "contoso backend started");

    heartbeat::spawn();

    let config = AppConfig::load();
    let store = connect_store(&config).await?;
    info!(backend = %store.backend(), "player repository ready");

    let app_state = AppState::new(store);
    let app = build_router(app_state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service_with_connect_info::<SocketAddr>();
    if let Err(err) = axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %err, "server stopped with an error");
        return Err(err).context("serving axum");
    }

    Ok(())
}

/// Build the single player store for this process from the configured backend.
async fn connect_store(config: &AppConfig) -> anyhow::Result<Arc<dyn PlayerStore>> {
    match config.backend {
        BackendKind::Document => connect_mongo(config).await,
        BackendKind::Relational => connect_postgres(config).await,
    }
}

#[cfg(feature = "mongo-store")]
async fn connect_mongo(config: &AppConfig) -> anyhow::Result<Arc<dyn PlayerStore>> {
    use contoso_back::dao::player_store::mongodb::{MongoConfig, MongoPlayerStore};

    let mongo_config = MongoConfig::from_uri(&config.mongo_uri, Some(&config.mongo_db))
        .await
        .context("configuring MongoDB")?;
    let store = MongoPlayerStore::connect(mongo_config)
        .await
        .context("connecting to MongoDB")?;
    info!(database = %config.mongo_db, "using MongoDB repository");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "mongo-store"))]
async fn connect_mongo(_config: &AppConfig) -> anyhow::Result<Arc<dyn PlayerStore>> {
    anyhow::bail!("document backend selected but the `mongo-store` feature is disabled")
}

#[cfg(feature = "postgres-store")]
async fn connect_postgres(config: &AppConfig) -> anyhow::Result<Arc<dyn PlayerStore>> {
    use contoso_back::dao::player_store::postgres::{PostgresConfig, PostgresPlayerStore};

    let store = PostgresPlayerStore::connect(PostgresConfig::new(config.postgres_url.clone()))
        .await
        .context("connecting to PostgreSQL")?;
    info!("using Postgres repository");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "postgres-store"))]
async fn connect_postgres(_config: &AppConfig) -> anyhow::Result<Arc<dyn PlayerStore>> {
    anyhow::bail!("relational backend selected but the `postgres-store` feature is disabled")
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState, config: &AppConfig) -> Router<()> {
    routes::router(state, &config.public_dir)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
