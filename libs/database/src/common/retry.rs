//! Bounded retry with exponential backoff for connection setup.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy: up to `max_retries` retries after the first attempt,
/// with delays doubling from `base_delay` up to `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Scatter each delay across 50-100% of its value so restarting
    /// replicas do not reconnect in lockstep
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Delay before retry number `attempt` (1-based).
    fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        let delay = self.base_delay.saturating_mul(factor).min(self.max_delay);

        if self.jitter { scatter(delay) } else { delay }
    }
}

/// Pick a pseudo-random point in [50%, 100%] of the delay.
fn scatter(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let roll = RandomState::new().hash_one(std::time::SystemTime::now()) % 51;
    delay / 100 * (50 + roll as u32)
}

/// Run `operation` until it succeeds or the retry budget is spent.
///
/// # Example
/// ```ignore
/// use database::common::{RetryConfig, retry_with_backoff};
///
/// let policy = RetryConfig::new().with_max_retries(5);
/// let client = retry_with_backoff(|| connect_from_config(&config), policy).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut failures = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if failures > 0 {
                    debug!("Operation succeeded after {} failed attempts", failures);
                }
                return Ok(value);
            }
            Err(e) if failures < config.max_retries => {
                failures += 1;
                let delay = config.delay_for(failures);
                debug!(
                    "Attempt {}/{} failed: {}. Next try in {:?}",
                    failures,
                    config.max_retries + 1,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                warn!("Giving up after {} attempts: {}", failures + 1, e);
                return Err(e);
            }
        }
    }
}

/// Retry with the default policy (3 retries starting at 100ms).
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}
