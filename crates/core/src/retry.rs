//! Bounded exponential backoff for calls to external collaborators.
//!
//! Each attempt is wrapped in a timeout. Only [`CoreError::ExternalService`]
//! failures are retried; anything else is returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::CoreError;

/// Tunable parameters for the retry loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Always at least 1.
    pub max_attempts: u32,
    /// Upper bound for a single attempt.
    pub attempt_timeout: Duration,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Cap on the delay between attempts.
    pub max_delay: Duration,
    /// Growth factor applied after each failure.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout: Duration::from_secs(10),
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
            multiplier: 2.0,
        }
    }
}

/// Next backoff delay, clamped to [`RetryPolicy::max_delay`].
pub fn next_delay(current: Duration, policy: &RetryPolicy) -> Duration {
    let next_ms = (current.as_millis() as f64 * policy.multiplier) as u64;
    Duration::from_millis(next_ms).min(policy.max_delay)
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// attempts run out. A timed-out attempt counts as an external failure.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut op: F,
) -> Result<T, CoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CoreError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let result = match tokio::time::timeout(policy.attempt_timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(CoreError::ExternalService(format!(
                "{operation} timed out after {}ms",
                policy.attempt_timeout.as_millis()
            ))),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(CoreError::ExternalService(msg)) if attempt < max_attempts => {
                tracing::warn!(
                    operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %msg,
                    "External call failed, retrying",
                );
                tokio::time::sleep(delay).await;
                delay = next_delay(delay, policy);
            }
            Err(err) => return Err(err),
        }
    }
}
