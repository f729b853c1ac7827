//! Retry policy for waterfall stages

use std::time::Duration;

use tracing::warn;

/// Controls how often a stage is attempted and how long to wait in between
///
/// The delay is constant: there is no backoff growth between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per stage, including the first; never zero
    max_attempts: u32,
    /// Wait between a failed attempt and the next one
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    /// Create a new RetryPolicy with custom values
    ///
    /// A `max_attempts` of zero would never run a stage, so it falls back to
    /// the default. A zero delay is allowed and retries immediately.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        let max_attempts = if max_attempts == 0 {
            let fallback = Self::default().max_attempts;
            warn!(max_attempts, fallback, "invalid max_attempts, using default");
            fallback
        } else {
            max_attempts
        };

        Self {
            max_attempts,
            delay,
        }
    }

    /// Policy that retries immediately
    pub fn no_delay(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Total attempts per stage, including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait between a failed attempt and the next one
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
