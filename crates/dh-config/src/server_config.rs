use crate::{ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_PORT, HostMode, MIN_PORT};

use std::time::Duration;

use serde::Deserialize;

// Bind wait constraints (milliseconds). 0 = a single bind attempt
pub const MAX_BIND_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_BIND_TIMEOUT_MS: u64 = 0;

// Startup timeout constraints (seconds)
pub const MIN_STARTUP_TIMEOUT_SECS: u64 = 1;
pub const MAX_STARTUP_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_STARTUP_TIMEOUT_SECS: u64 = 5;

// Shutdown grace period constraints (seconds)
pub const MIN_SHUTDOWN_GRACE_SECS: u64 = 1;
pub const MAX_SHUTDOWN_GRACE_SECS: u64 = 120;
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// Listening port (0 = OS-assigned)
    pub port: u16,
    pub host_mode: HostMode,
    /// How long to keep retrying a busy port before giving up
    pub bind_timeout_ms: u64,
    /// How long `acquire` waits for the server to accept connections
    pub startup_timeout_secs: u64,
    /// How long `release` waits for connections to drain
    pub shutdown_grace_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            host_mode: HostMode::default(),
            bind_timeout_ms: DEFAULT_BIND_TIMEOUT_MS,
            startup_timeout_secs: DEFAULT_STARTUP_TIMEOUT_SECS,
            shutdown_grace_secs: DEFAULT_SHUTDOWN_GRACE_SECS,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::server("server.host must not be empty"));
        }

        // Port 0 means "auto-assign" - OS picks an available port.
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::server(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if self.bind_timeout_ms > MAX_BIND_TIMEOUT_MS {
            return Err(ConfigError::server(format!(
                "server.bind_timeout_ms must be 0-{}, got {}",
                MAX_BIND_TIMEOUT_MS, self.bind_timeout_ms
            )));
        }

        if self.startup_timeout_secs < MIN_STARTUP_TIMEOUT_SECS
            || self.startup_timeout_secs > MAX_STARTUP_TIMEOUT_SECS
        {
            return Err(ConfigError::server(format!(
                "server.startup_timeout_secs must be {}-{}, got {}",
                MIN_STARTUP_TIMEOUT_SECS, MAX_STARTUP_TIMEOUT_SECS, self.startup_timeout_secs
            )));
        }

        if self.shutdown_grace_secs < MIN_SHUTDOWN_GRACE_SECS
            || self.shutdown_grace_secs > MAX_SHUTDOWN_GRACE_SECS
        {
            return Err(ConfigError::server(format!(
                "server.shutdown_grace_secs must be {}-{}, got {}",
                MIN_SHUTDOWN_GRACE_SECS, MAX_SHUTDOWN_GRACE_SECS, self.shutdown_grace_secs
            )));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn bind_timeout(&self) -> Duration {
        Duration::from_millis(self.bind_timeout_ms)
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
