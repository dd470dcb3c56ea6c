use crate::{Result as WsErrorResult, Transport, WsError};

use dh_config::ClientConfig;

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2_000;

/// Options for [`EventClient::connect`](crate::EventClient::connect)
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Transport allow-list; must be exactly `[WebSocket]`
    pub transports: Vec<Transport>,
    /// Upper bound for the upgrade plus the connect acknowledgement
    pub connect_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            transports: vec![Transport::WebSocket],
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
        }
    }
}

impl From<&ClientConfig> for ClientOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            transports: config.transports.clone(),
            connect_timeout: config.connect_timeout(),
        }
    }
}

impl ClientOptions {
    /// Reject anything that would permit a polling fallback
    #[track_caller]
    pub fn validate(&self) -> WsErrorResult<Transport> {
        match self.transports.as_slice() {
            [Transport::WebSocket] => Ok(Transport::WebSocket),
            [] => Err(WsError::TransportNotAllowed {
                message: "transport list is empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            listed => {
                let names: Vec<&str> = listed.iter().map(Transport::as_str).collect();
                Err(WsError::TransportNotAllowed {
                    message: format!("only [websocket] is allowed, got [{}]", names.join(", ")),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }
}
