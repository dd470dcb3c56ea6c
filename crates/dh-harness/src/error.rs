use crate::AssertionMismatch;

use dh_ws::WsError;

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Cannot bind {addr}: {source} {location}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Server failed to start: {message} {location}")]
    Startup {
        message: String,
        location: ErrorLocation,
    },

    #[error("Connect failed: {message} {location}")]
    Connect {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server did not drain within {}ms {location}", .grace.as_millis())]
    ShutdownTimeout {
        grace: Duration,
        location: ErrorLocation,
    },

    #[error("Server failed while stopping: {message} {location}")]
    Shutdown {
        message: String,
        location: ErrorLocation,
    },

    #[error(
        "{mismatch} (gave up after {attempts} attempts in {}ms) {location}",
        .elapsed.as_millis()
    )]
    AssertionTimeout {
        mismatch: AssertionMismatch,
        attempts: u32,
        elapsed: Duration,
        location: ErrorLocation,
    },

    #[error("{mismatch} {location}")]
    Assertion {
        mismatch: AssertionMismatch,
        location: ErrorLocation,
    },

    #[error("Invalid retry policy: {message} {location}")]
    InvalidPolicy {
        message: String,
        location: ErrorLocation,
    },
}

impl HarnessError {
    /// Stable kind code, printed by the scenario binary on failure
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bind { .. } => "BIND_ERROR",
            Self::Startup { .. } => "STARTUP_ERROR",
            Self::Connect { .. } => "CONNECT_ERROR",
            Self::ShutdownTimeout { .. } => "SHUTDOWN_TIMEOUT",
            Self::Shutdown { .. } => "SHUTDOWN_ERROR",
            Self::AssertionTimeout { .. } => "ASSERTION_TIMEOUT",
            Self::Assertion { .. } => "ASSERTION_FAILED",
            Self::InvalidPolicy { .. } => "INVALID_POLICY",
        }
    }

    #[track_caller]
    pub fn startup<S: Into<String>>(message: S) -> Self {
        Self::Startup {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn connect<S: Into<String>>(message: S) -> Self {
        Self::Connect {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn shutdown_timeout(grace: Duration) -> Self {
        Self::ShutdownTimeout {
            grace,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn shutdown<S: Into<String>>(message: S) -> Self {
        Self::Shutdown {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_policy<S: Into<String>>(message: S) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The mismatch carried by an assertion failure
    pub fn mismatch(&self) -> Option<&AssertionMismatch> {
        match self {
            Self::AssertionTimeout { mismatch, .. } | Self::Assertion { mismatch, .. } => {
                Some(mismatch)
            }
            _ => None,
        }
    }
}

impl From<WsError> for HarnessError {
    #[track_caller]
    fn from(e: WsError) -> Self {
        Self::Connect {
            message: format!("[{}] {e}", e.error_code()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
