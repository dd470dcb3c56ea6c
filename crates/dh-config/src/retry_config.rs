use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Poll interval constraints (milliseconds)
pub const MIN_INTERVAL_MS: u64 = 1;
pub const MAX_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_INTERVAL_MS: u64 = 100;

// Total deadline constraints (milliseconds)
pub const MAX_DEADLINE_MS: u64 = 300_000;
pub const DEFAULT_DEADLINE_MS: u64 = 5_000;

/// Polling settings for eventual assertions.
///
/// The deadline must exceed the interval so at least one retry happens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Fixed delay between predicate evaluations
    pub interval_ms: u64,
    /// Total time budget for the assertion
    pub deadline_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            deadline_ms: DEFAULT_DEADLINE_MS,
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.interval_ms < MIN_INTERVAL_MS || self.interval_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::retry(format!(
                "retry.interval_ms must be {}-{}, got {}",
                MIN_INTERVAL_MS, MAX_INTERVAL_MS, self.interval_ms
            )));
        }

        if self.deadline_ms > MAX_DEADLINE_MS {
            return Err(ConfigError::retry(format!(
                "retry.deadline_ms must be at most {}, got {}",
                MAX_DEADLINE_MS, self.deadline_ms
            )));
        }

        if self.deadline_ms <= self.interval_ms {
            return Err(ConfigError::retry(format!(
                "retry.deadline_ms ({}) must be greater than retry.interval_ms ({})",
                self.deadline_ms, self.interval_ms
            )));
        }

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}
