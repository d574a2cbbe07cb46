//! Bounded exponential-backoff retry for the step operation.
//!
//! The step call is the only operation in the system that retries. The
//! sequence is strictly serial: a new attempt starts only after the prior
//! attempt failed and the backoff delay elapsed. A manual re-invocation
//! restarts the whole sequence from attempt 1.

use simtwin_core::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Default number of attempts, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the second attempt; doubles per subsequent attempt.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(200);

/// Retry schedule: at most `max_attempts` tries, waiting
/// `base_delay * 2^(n-1)` after the n-th failure. No wait follows the
/// final failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay inserted after the given 1-based failed attempt.
    pub fn backoff_delay(&self, failed_attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(failed_attempt.saturating_sub(1))
    }

    /// Runs `operation` until it succeeds or the attempt budget is spent.
    ///
    /// Transport and application failures are indistinguishable here; any
    /// `Err` counts as a failed attempt. After exhaustion the last error is
    /// returned verbatim.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt >= self.max_attempts {
                        return Err(err);
                    }
                    let delay = self.backoff_delay(attempt);
                    tracing::debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "attempt failed, backing off: {err}"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
