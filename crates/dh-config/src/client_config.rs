use crate::{ConfigError, ConfigErrorResult, Transport};

use std::time::Duration;

use serde::Deserialize;

// Connect acknowledgement timeout constraints (milliseconds)
pub const MIN_CONNECT_TIMEOUT_MS: u64 = 50;
pub const MAX_CONNECT_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2_000;

// Pause between connect and disconnect (milliseconds)
pub const MAX_HOLD_MS: u64 = 60_000;
pub const DEFAULT_HOLD_MS: u64 = 0;

// Sanity-check HTTP request timeout (milliseconds)
pub const MIN_HTTP_TIMEOUT_MS: u64 = 50;
pub const MAX_HTTP_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 1_000;

/// Client-side session settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Transport allow-list. Must be exactly `["websocket"]`.
    pub transports: Vec<Transport>,
    pub connect_timeout_ms: u64,
    pub hold_ms: u64,
    pub http_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transports: vec![Transport::WebSocket],
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            hold_ms: DEFAULT_HOLD_MS,
            http_timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.transports != [Transport::WebSocket] {
            let listed: Vec<&str> = self.transports.iter().map(Transport::as_str).collect();
            return Err(ConfigError::client(format!(
                "client.transports must be exactly [websocket], got [{}]",
                listed.join(", ")
            )));
        }

        if self.connect_timeout_ms < MIN_CONNECT_TIMEOUT_MS
            || self.connect_timeout_ms > MAX_CONNECT_TIMEOUT_MS
        {
            return Err(ConfigError::client(format!(
                "client.connect_timeout_ms must be {}-{}, got {}",
                MIN_CONNECT_TIMEOUT_MS, MAX_CONNECT_TIMEOUT_MS, self.connect_timeout_ms
            )));
        }

        if self.hold_ms > MAX_HOLD_MS {
            return Err(ConfigError::client(format!(
                "client.hold_ms must be 0-{}, got {}",
                MAX_HOLD_MS, self.hold_ms
            )));
        }

        if self.http_timeout_ms < MIN_HTTP_TIMEOUT_MS || self.http_timeout_ms > MAX_HTTP_TIMEOUT_MS
        {
            return Err(ConfigError::client(format!(
                "client.http_timeout_ms must be {}-{}, got {}",
                MIN_HTTP_TIMEOUT_MS, MAX_HTTP_TIMEOUT_MS, self.http_timeout_ms
            )));
        }

        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}
