//! Randomized pause between feed requests.

use std::time::Duration;

use rand::Rng;

/// Uniform random delay in `[min, max]`, applied before each feed request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacer {
    min_secs: f64,
    max_secs: f64,
}

impl Pacer {
    /// Bounds are clamped to be non-negative and ordered.
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        let min_secs = min_secs.max(0.0);
        Self {
            min_secs,
            max_secs: max_secs.max(min_secs),
        }
    }

    /// A pacer that never sleeps.
    pub fn disabled() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Draw the next delay. Bounds too large for a [`Duration`] saturate.
    pub fn next_delay(&self) -> Duration {
        if self.max_secs <= 0.0 {
            return Duration::ZERO;
        }
        let secs = if self.min_secs < self.max_secs {
            rand::rng().random_range(self.min_secs..=self.max_secs)
        } else {
            self.min_secs
        };
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
