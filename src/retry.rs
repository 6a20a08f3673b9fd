//! Exponential backoff for flaky translation backends.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// How often, and how patiently, to retry a failing call.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts, the first one included. Zero behaves like one.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Growth factor applied to the delay after every retry.
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Three attempts waiting 1s then 2s, capped at 5s.
    ///
    /// Kept well under the engine's per-translation deadline.
    pub fn translation() -> Self {
        Self::new(3, Duration::from_secs(1)).with_max_delay(Duration::from_secs(5))
    }

    pub fn single_attempt() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Wait before attempt `attempt` (0-indexed); the first attempt never waits.
    fn delay_before(&self, attempt: u32) -> Duration {
        let Some(retry) = attempt.checked_sub(1) else {
            return Duration::ZERO;
        };

        let factor = self.backoff_multiplier.powi(retry as i32);
        let millis = self.initial_delay.as_millis() as f64 * factor;
        Duration::from_millis(millis as u64).min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::translation()
    }
}

/// Run `operation` until it succeeds, `should_retry` rejects its error, or
/// attempts run out. The last error is returned unchanged.
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    label: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        let delay = config.delay_before(attempt);
        if !delay.is_zero() {
            debug!("{}: waiting {:?} before attempt {}/{}", label, delay, attempt + 1, attempts);
            sleep(delay).await;
        }

        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !should_retry(&error) {
            debug!("{}: giving up on non-retryable error: {}", label, error);
            return Err(error);
        }
        attempt += 1;
        if attempt == attempts {
            warn!("{}: failed after {} attempts: {}", label, attempts, error);
            return Err(error);
        }
        warn!("{}: attempt {}/{} failed: {}", label, attempt, attempts, error);
    }
}
