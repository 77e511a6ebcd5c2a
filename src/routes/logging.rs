use std::{net::SocketAddr, time::Instant};

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};

/// Log one event per request, escalating the level with the response status.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned());

    let started = Instant::now();
    let response = next.run(request).await;
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        error!(%method, %path, status, latency_ms, %client, "HTTP request");
    } else if response.status().is_client_error() {
        warn!(%method, %path, status, latency_ms, %client, "HTTP request");
    } else {
        info!(%method, %path, status, latency_ms, %client, "HTTP request");
    }

    response
}
