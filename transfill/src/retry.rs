//! Bounded retry-on-throttle execution for provider calls.

use std::{future::Future, time::Duration};

use crate::error::Error;

/// Retry policy for rate-limited provider calls: a fixed maximum attempt
/// count with a fixed (not exponential) pause before every attempt after
/// the first.
///
/// The knobs are explicit fields rather than module constants so tests can
/// run with near-zero delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        RetryPolicy { max_attempts, delay }
    }

    /// Runs `op` up to `max_attempts` times, pausing `delay` before every
    /// attempt after the first.
    ///
    /// Only a rate-limit signal ([`Error::is_rate_limited`]) is retried; any
    /// other failure propagates immediately without consuming the remaining
    /// attempts. If every attempt is rate-limited, the last observed error
    /// is returned.
    pub async fn execute<T, F, Fut>(&self, mut op: F) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let mut last_error = None;
        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                tokio::time::sleep(self.delay).await;
            }
            match op().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_rate_limited() => {
                    tracing::debug!(attempt = attempt + 1, %error, "rate limited, will retry");
                    last_error = Some(error);
                }
                Err(error) => return Err(error),
            }
        }
        Err(last_error
            .unwrap_or_else(|| Error::Provider("retry policy allows no attempts".to_string())))
    }
}
