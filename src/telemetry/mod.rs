//! Tracing setup: console output plus optional Elasticsearch shipping.

/// Elasticsearch log shipping.
#[cfg(feature = "elastic-log")]
pub mod elastic;

use std::env;

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives used when neither `RUST_LOG` nor `LOG_LEVEL` is set.
const DEFAULT_DIRECTIVES: &str = "info,tower_http=debug";

/// Configure tracing subscribers so logs include spans by default.
///
/// Must run inside the tokio runtime: the Elasticsearch shipper is a task.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| directives(env::var("LOG_LEVEL").ok().as_deref()).into());
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    #[cfg(feature = "elastic-log")]
    {
        let (layer, shipping) = elastic::from_env();
        registry.with(layer).init();
        shipping.report();
    }

    #[cfg(not(feature = "elastic-log"))]
    registry.init();
}

/// Parse a `LOG_LEVEL` value (`DEBUG`, `INFO`, `WARN`, `ERROR`, any case).
/// Unknown values fall back to `INFO`.
pub fn parse_level(value: &str) -> Level {
    match value.trim().to_ascii_uppercase().as_str() {
        "WARNING" => Level::WARN,
        other => other.parse().unwrap_or(Level::INFO),
    }
}

fn directives(log_level: Option<&str>) -> String {
    match log_level.filter(|value| !value.trim().is_empty()) {
        Some(value) => parse_level(value).as_str().to_ascii_lowercase(),
        None => DEFAULT_DIRECTIVES.to_owned(),
    }
}
