use crate::{HarnessError, Result as HarnessResult};

use dh_config::RetryConfig;

use std::time::Duration;

const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Fixed poll interval and total deadline for [`retry_until`](crate::retry_until).
///
/// Invariant: `interval > 0` and `deadline > interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    interval: Duration,
    deadline: Duration,
}

impl RetryPolicy {
    #[track_caller]
    pub fn new(interval: Duration, deadline: Duration) -> HarnessResult<Self> {
        if interval.is_zero() {
            return Err(HarnessError::invalid_policy("interval must be greater than zero"));
        }

        if deadline <= interval {
            return Err(HarnessError::invalid_policy(format!(
                "deadline ({}ms) must be greater than interval ({}ms)",
                deadline.as_millis(),
                interval.as_millis()
            )));
        }

        Ok(Self { interval, deadline })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            deadline: DEFAULT_DEADLINE,
        }
    }
}

impl TryFrom<&RetryConfig> for RetryPolicy {
    type Error = HarnessError;

    #[track_caller]
    fn try_from(config: &RetryConfig) -> HarnessResult<Self> {
        Self::new(config.interval(), config.deadline())
    }
}
