//! Retry budget and backoff schedule.

use std::time::Duration;

use rand::Rng;

use reviewharvest_shared::HttpConfig;

/// HTTP statuses worth retrying: rate limiting and gateway/server hiccups.
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Whether a response status should be retried rather than treated as final.
pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// Attempt budget plus exponential backoff with bounded jitter.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent one.
    pub base_delay: Duration,
    /// Upper bound of the uniform random delay added to every backoff.
    pub jitter: Duration,
}

impl RetryPolicy {
    /// A policy that retries without sleeping.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    /// Deterministic part of the delay after the zero-based `attempt` failed:
    /// `base_delay * 2^attempt`, saturating at [`Duration::MAX`].
    pub fn base_backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .checked_mul(1 << attempt.min(30))
            .unwrap_or(Duration::MAX)
    }

    /// Full delay after `attempt` failed: [`Self::base_backoff`] plus
    /// `uniform(0, jitter)`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let jitter = if self.jitter.is_zero() {
            Duration::ZERO
        } else {
            let secs = self.jitter.as_secs_f64() * rand::rng().random::<f64>();
            Duration::try_from_secs_f64(secs)
                .unwrap_or(self.jitter)
                .min(self.jitter)
        };
        self.base_backoff(attempt).saturating_add(jitter)
    }
}

impl From<&HttpConfig> for RetryPolicy {
    fn from(config: &HttpConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: secs_to_duration(config.base_delay_secs),
            jitter: secs_to_duration(config.jitter_secs),
        }
    }
}

/// Negative or NaN becomes zero; anything past [`Duration::MAX`] saturates.
fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&HttpConfig::default())
    }
}
