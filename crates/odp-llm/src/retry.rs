//! Retry schedule for LLM calls.
//!
//! A [`RetryPolicy`] bounds the number of attempts and spaces them with
//! capped exponential backoff. [`JsonCaller`](crate::JsonCaller) applies it
//! in an explicit loop; the policy itself only answers "how long before
//! retry `n`".

use std::time::Duration;

use odp_config::RetryConfig;

/// Configuration for retrying a generation + extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Factor applied to the delay after every retry.
    pub multiplier: u32,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            multiplier: 2,
            max_delay: Duration::from_secs(20),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
            multiplier: config.multiplier,
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            multiplier: 1,
            max_delay: Duration::ZERO,
        }
    }

    /// Wait before retry number `retry` (1-based):
    /// `min(base_delay * multiplier^(retry - 1), max_delay)`.
    #[must_use]
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Every wait the policy can produce, in order. Has `max_attempts - 1`
    /// entries.
    #[must_use]
    pub fn schedule(&self) -> Vec<Duration> {
        (1..self.max_attempts)
            .map(|retry| self.delay_before_retry(retry))
            .collect()
    }
}
