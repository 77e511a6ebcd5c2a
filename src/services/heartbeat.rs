use std::time::Duration;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::{
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::info;

/// Period between two heartbeat events.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);

/// Emit a heartbeat event forever so log consumers can tell the process is alive.
pub fn spawn() -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(HEARTBEAT_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let time = OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_else(|_| "invalid-timestamp".into());
            info!(event = "heartbeat", time = %time, "background service heartbeat");
        }
    })
}
