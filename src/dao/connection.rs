use std::{fmt::Display, future::Future, time::Duration};

use tokio::time::sleep;
use tracing::warn;

/// Backoff used while a backend is being reached for the first time at startup.
///
/// Only bootstrap goes through this policy; player operations never retry.
pub struct RetryPolicy;

impl RetryPolicy {
    /// Attempts before bootstrap gives up.
    pub const MAX_ATTEMPTS: u32 = 10;
    const INITIAL_DELAY_MS: u64 = 250;

    /// Wait after the first failure.
    pub fn initial_delay() -> Duration {
        Duration::from_millis(Self::INITIAL_DELAY_MS)
    }

    /// Double `current`, capped at five seconds.
    pub fn next_delay(current: Duration) -> Duration {
        (current * 2).min(Duration::from_secs(5))
    }
}

/// Repeat `attempt` with exponential backoff until it succeeds or the policy gives up.
///
/// Returns the last error together with the number of attempts made.
pub async fn retry_connect<T, E, F, Fut>(backend: &'static str, mut attempt: F) -> Result<T, (u32, E)>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempts = 0;
    let mut delay = RetryPolicy::initial_delay();

    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempts += 1;
                if attempts >= RetryPolicy::MAX_ATTEMPTS {
                    return Err((attempts, err));
                }
                warn!(backend, attempts, error = %err, "storage not reachable yet; retrying");
                sleep(delay).await;
                delay = RetryPolicy::next_delay(delay);
            }
        }
    }
}
