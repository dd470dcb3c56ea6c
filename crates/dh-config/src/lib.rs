mod client_config;
mod config;
mod error;
mod host_mode;
mod log_level;
mod logging_config;
mod retry_config;
mod server_config;
mod transport;

#[cfg(test)]
mod tests;

pub use client_config::ClientConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use host_mode::HostMode;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use retry_config::RetryConfig;
pub use server_config::ServerConfig;
pub use transport::Transport;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 0;
const MIN_PORT: u16 = 1024;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

/// Environment variable that relocates the config directory.
pub const CONFIG_DIR_ENV: &str = "DH_CONFIG_DIR";
