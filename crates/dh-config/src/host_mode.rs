use crate::ConfigError;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Where the server under test runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMode {
    /// A task on the caller's tokio runtime
    #[default]
    Task,
    /// A dedicated thread owning a private current-thread runtime
    Thread,
}

impl fmt::Display for HostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => f.write_str("task"),
            Self::Thread => f.write_str("thread"),
        }
    }
}

impl FromStr for HostMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "task" => Ok(Self::Task),
            "thread" => Ok(Self::Thread),
            other => Err(ConfigError::server(format!(
                "server.host_mode must be 'task' or 'thread', got '{other}'"
            ))),
        }
    }
}
