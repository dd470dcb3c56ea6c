use crate::ConfigError;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Transport used to carry real-time protocol packets.
///
/// Only `WebSocket` is served. `Polling` exists so configurations that ask
/// for it can be recognized and rejected instead of silently falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[serde(alias = "ws")]
    WebSocket,
    Polling,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebSocket => "websocket",
            Self::Polling => "polling",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "websocket" | "ws" => Ok(Self::WebSocket),
            "polling" => Ok(Self::Polling),
            other => Err(ConfigError::client(format!("unknown transport '{other}'"))),
        }
    }
}
