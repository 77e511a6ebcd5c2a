//! Ships tracing events to an Elasticsearch index alongside the console output.

use std::{env, fmt, time::Duration};

use reqwest::Client;
use serde_json::{Map, Number, Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::sync::mpsc;
use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    info, warn,
};
use tracing_subscriber::{Layer, layer::Context};

/// Value of the `service` field on every shipped document.
pub const SERVICE_NAME: &str = "contoso-backend";
const DEFAULT_INDEX_PREFIX: &str = "contoso-";
const CHANNEL_CAPACITY: usize = 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
/// Events about shipping itself stay on the console.
const SHIPPER_TARGET: &str = "contoso_back::telemetry::shipper";
/// Crates driving the shipper's own HTTP traffic.
const TRANSPORT_TARGETS: [&str; 4] = ["hyper", "reqwest", "h2", "rustls"];

/// Where and as whom log documents are indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticConfig {
    /// Cluster base URL.
    pub url: String,
    /// Basic auth user.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// Index name, or prefix when it ends in `-`.
    pub index_prefix: String,
}

impl ElasticConfig {
    /// Read `ELASTICSEARCH_*` variables. Shipping stays off unless URL,
    /// username and password are all present.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());
        Some(Self {
            url: lookup("ELASTICSEARCH_URL")?,
            username: lookup("ELASTICSEARCH_USERNAME")?,
            password: lookup("ELASTICSEARCH_PASSWORD")?,
            index_prefix: lookup("ELASTICSEARCH_INDEX")
                .unwrap_or_else(|| DEFAULT_INDEX_PREFIX.to_owned()),
        })
    }
}

/// Resolve the target index; a prefix ending in `-` rolls over daily.
pub fn index_name(prefix: &str, now: OffsetDateTime) -> String {
    if prefix.ends_with('-') {
        format!(
            "{prefix}{:04}-{:02}-{:02}",
            now.year(),
            u8::from(now.month()),
            now.day()
        )
    } else {
        prefix.to_owned()
    }
}

/// Outcome of the shipping setup, reported once the subscriber is installed.
pub enum Shipping {
    /// Events are shipped to `url`.
    Enabled {
        /// Cluster base URL.
        url: String,
        /// Configured index prefix.
        index_prefix: String,
    },
    /// Credentials incomplete.
    NotConfigured,
    /// The HTTP client could not be built.
    ClientFailed(reqwest::Error),
}

impl Shipping {
    /// Log the outcome once the subscriber is installed.
    pub fn report(self) {
        match self {
            Shipping::Enabled { url, index_prefix } => {
                info!(%url, index = %index_prefix, "shipping logs to Elasticsearch")
            }
            Shipping::NotConfigured => {
                info!("Elasticsearch credentials not set; logging to console only")
            }
            Shipping::ClientFailed(err) => {
                warn!(error = %err, "failed to build Elasticsearch client; logging to console only")
            }
        }
    }
}

/// Build the shipping layer from the environment, if configured.
pub fn from_env() -> (Option<ElasticLayer>, Shipping) {
    let Some(config) = ElasticConfig::from_env() else {
        return (None, Shipping::NotConfigured);
    };

    let shipping = Shipping::Enabled {
        url: config.url.clone(),
        index_prefix: config.index_prefix.clone(),
    };
    match ElasticLayer::spawn(config) {
        Ok(layer) => (Some(layer), shipping),
        Err(err) => (None, Shipping::ClientFailed(err)),
    }
}

/// [`Layer`] turning each event into a JSON document for the background shipper.
///
/// Never blocks: when the shipper falls behind, new documents are dropped.
pub struct ElasticLayer {
    sender: mpsc::Sender<Value>,
}

impl ElasticLayer {
    /// Start the shipper task. Must be called inside a tokio runtime.
    pub fn spawn(config: ElasticConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(ship(client, config, receiver));
        Ok(Self::new(sender))
    }

    fn new(sender: mpsc::Sender<Value>) -> Self {
        Self { sender }
    }
}

impl<S> Layer<S> for ElasticLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !is_shipped(metadata.target()) {
            return;
        }

        let mut fields = FieldVisitor::default();
        event.record(&mut fields);
        let document = build_document(metadata.level(), fields, OffsetDateTime::now_utc());
        let _ = self.sender.try_send(document);
    }
}

fn is_shipped(target: &str) -> bool {
    target != SHIPPER_TARGET
        && !TRANSPORT_TARGETS
            .iter()
            .any(|transport| target.starts_with(transport))
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.insert(field, Value::String(rendered));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.insert(field, Value::String(value.to_owned()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        let value = Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(value.to_string()));
        self.insert(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }
}

// Event fields are applied last and win over the base keys.
fn build_document(level: &Level, fields: FieldVisitor, timestamp: OffsetDateTime) -> Value {
    let mut document = Map::new();
    document.insert(
        "@timestamp".to_owned(),
        Value::String(
            timestamp
                .format(&Rfc3339)
                .unwrap_or_else(|_| "invalid-timestamp".into()),
        ),
    );
    document.insert("level".to_owned(), Value::String(level.as_str().to_owned()));
    document.insert("service".to_owned(), Value::String(SERVICE_NAME.to_owned()));
    document.insert(
        "message".to_owned(),
        Value::String(fields.message.unwrap_or_default()),
    );
    document.extend(fields.fields);
    Value::Object(document)
}

async fn ship(client: Client, config: ElasticConfig, mut receiver: mpsc::Receiver<Value>) {
    let base_url = config.url.trim_end_matches('/').to_owned();

    while let Some(document) = receiver.recv().await {
        let index = index_name(&config.index_prefix, OffsetDateTime::now_utc());
        let response = client
            .post(format!("{base_url}/{index}/_doc"))
            .basic_auth(&config.username, Some(&config.password))
            .json(&document)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => warn!(
                target: SHIPPER_TARGET,
                status = %response.status(),
                index = %index,
                "Elasticsearch rejected log document"
            ),
            Err(err) => warn!(
                target: SHIPPER_TARGET,
                error = %err,
                "failed to ship log document"
            ),
        }
    }
}
