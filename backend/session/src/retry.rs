//! Bounded retry with exponential backoff for catalog and review fetches.
//!
//! The summary stream never goes through this; a failed stream is restarted
//! explicitly by the user.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
    /// Retries after the first failed attempt.
    pub retries: u32,
    /// Delay before the first retry in milliseconds.
    pub base_delay_ms: u64,
    /// Multiplier applied for each subsequent retry.
    pub backoff_factor: f64,
    /// Maximum delay cap in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            base_delay_ms: 1_000,
            backoff_factor: 2.0,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (1-indexed).
    pub fn delay_for(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        let delay_ms = self.base_delay_ms as f64 * self.backoff_factor.powi((retry - 1) as i32);
        Duration::from_millis(delay_ms.min(self.max_delay_ms as f64) as u64)
    }

    /// Whether another attempt is allowed after `failures` failed attempts.
    pub fn should_retry(&self, failures: u32) -> bool {
        failures <= self.retries
    }

    pub fn max_attempts(&self) -> u32 {
        self.retries + 1
    }
}
