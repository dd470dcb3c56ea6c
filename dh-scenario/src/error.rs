use dh_config::ConfigError;
use dh_harness::HarnessError;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Harness(#[from] HarnessError),

    #[error("Failed to create log directory {path}: {source}")]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

impl ScenarioError {
    /// Kind printed before the message when the binary fails
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Harness(e) => e.kind(),
            Self::LogDir { .. } | Self::Logger { .. } => "LOGGER_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScenarioError>;
