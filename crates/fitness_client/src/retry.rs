//! Opt-in retry for idempotent backend reads.
//!
//! Nothing in this crate retries implicitly; callers wrap the reads they
//! want retried. Only transient failures (connection trouble, 5xx) are
//! retried — an auth rejection or a validation error will come back the
//! same way every time, so those return immediately.

use crate::StoreError;
use rand::{RngExt, rng};
use std::time::Duration;

impl StoreError {
    /// Whether retrying the same request can plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Api { status, .. } => *status >= 500,
            Self::Auth(_)
            | Self::NotFound(_)
            | Self::InvalidInput(_)
            | Self::Config(_)
            | Self::Domain(_) => false,
        }
    }
}

/// Exponential backoff with jitter around a store operation.
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Run `op`, retrying while it fails transiently. Non-transient errors
    /// and exhaustion hand back the last error.
    pub async fn run<F, Fut, T>(&self, mut op: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, StoreError>>,
    {
        let mut attempt = 0u32;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.backoff_delay(attempt);
                    tracing::debug!(attempt, ?delay, error = %e, "retrying store read");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Jittered delay for the given attempt, capped by the exponential
    /// schedule.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let ceiling = self.base_delay * (1u32 << attempt.min(16));
        let mut rng = rng();
        let jitter = rng.random_range(0..=ceiling.as_millis() as u64);
        Duration::from_millis(jitter)
    }
}
