use crate::{
    CONFIG_DIR_ENV, ClientConfig, ConfigError, ConfigErrorResult, LoggingConfig, RetryConfig,
    ServerConfig, Transport,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_CONFIG_DIR: &str = ".dh";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for DH_CONFIG_DIR env var, else use ./.dh/
    /// 2. Load config.toml if it exists, else use defaults
    /// 3. Apply DH_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: DH_CONFIG_DIR env var > ./.dh/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.client.validate()?;
        self.retry.validate()?;

        if let Some(ref file) = self.logging.file
            && (Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::config(
                "logging.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref file) => {
                let dir = Self::config_dir()?.join(&self.logging.dir);
                Ok(Some(dir.join(file)))
            }
            None => Ok(None),
        }
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {} (host mode: {}, bind wait {}ms, startup {}s, grace {}s)",
            self.server.bind_addr(),
            self.server.host_mode,
            self.server.bind_timeout_ms,
            self.server.startup_timeout_secs,
            self.server.shutdown_grace_secs
        );

        let transports: Vec<&str> = self.client.transports.iter().map(Transport::as_str).collect();
        info!(
            "  client: transports=[{}], connect={}ms, hold={}ms, http={}ms",
            transports.join(", "),
            self.client.connect_timeout_ms,
            self.client.hold_ms,
            self.client.http_timeout_ms
        );

        info!(
            "  retry: interval={}ms, deadline={}ms",
            self.retry.interval_ms, self.retry.deadline_ms
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("DH_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("DH_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse("DH_SERVER_HOST_MODE", &mut self.server.host_mode);
        Self::apply_env_parse("DH_SERVER_BIND_TIMEOUT_MS", &mut self.server.bind_timeout_ms);
        Self::apply_env_parse(
            "DH_SERVER_STARTUP_TIMEOUT_SECS",
            &mut self.server.startup_timeout_secs,
        );
        Self::apply_env_parse(
            "DH_SERVER_SHUTDOWN_GRACE_SECS",
            &mut self.server.shutdown_grace_secs,
        );

        // Client
        Self::apply_env_list("DH_CLIENT_TRANSPORTS", &mut self.client.transports);
        Self::apply_env_parse(
            "DH_CLIENT_CONNECT_TIMEOUT_MS",
            &mut self.client.connect_timeout_ms,
        );
        Self::apply_env_parse("DH_CLIENT_HOLD_MS", &mut self.client.hold_ms);
        Self::apply_env_parse("DH_CLIENT_HTTP_TIMEOUT_MS", &mut self.client.http_timeout_ms);

        // Retry
        Self::apply_env_parse("DH_RETRY_INTERVAL_MS", &mut self.retry.interval_ms);
        Self::apply_env_parse("DH_RETRY_DEADLINE_MS", &mut self.retry.deadline_ms);

        // Logging
        Self::apply_env_parse("DH_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("DH_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("DH_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply comma-separated override; ignored unless every entry parses
    fn apply_env_list<T: std::str::FromStr>(var_name: &str, target: &mut Vec<T>) {
        if let Ok(val) = std::env::var(var_name) {
            let parsed: Result<Vec<T>, _> = val
                .split(',')
                .filter(|item| !item.trim().is_empty())
                .map(|item| item.trim().parse())
                .collect();
            if let Ok(items) = parsed {
                *target = items;
            }
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
