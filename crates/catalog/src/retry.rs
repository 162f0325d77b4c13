//! Retry policy for catalog store round trips.
//!
//! The delay schedule is a pure function of the attempt number and a
//! jitter fraction; `run` is the single place that sleeps, so the policy
//! is testable without real time passing.

use std::future::Future;
use std::time::Duration;

use shop_agent_core::StoreError;

/// Jitter window added on top of the exponential delay.
const JITTER_WINDOW: Duration = Duration::from_millis(300);

/// Exponential backoff policy. Read once at startup, immutable after.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (minimum 1).
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each retry.
    pub base_delay: Duration,
    /// Upper bound for the exponential part of the delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(4),
        }
    }
}

impl RetryPolicy {
    /// Delay before the given 1-based attempt; attempt 1 never waits.
    ///
    /// `jitter` must be in `[0, 1)` and maps onto a `[0, 300ms)` window.
    pub fn delay(&self, attempt: u32, jitter: f64) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let exponent = (attempt - 2).min(16);
        let backoff = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(exponent))
            .min(self.max_delay);
        backoff + JITTER_WINDOW.mul_f64(jitter.clamp(0.0, 1.0))
    }

    /// Run `op` until it succeeds or the attempt budget is spent.
    ///
    /// `op` receives the 1-based attempt number. Exhaustion yields
    /// `StoreError::RetriesExhausted` carrying the final attempt's error,
    /// distinct from any ordinary empty result.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, StoreError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut last_error: Option<StoreError> = None;

        for attempt in 1..=attempts {
            if attempt > 1 {
                let delay = self.delay(attempt, fastrand::f64());
                tracing::warn!(
                    attempt,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    "store request failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }

            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => last_error = Some(err),
            }
        }

        let last_error = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempts were made".to_string());
        Err(StoreError::RetriesExhausted {
            attempts,
            last_error,
        })
    }
}
