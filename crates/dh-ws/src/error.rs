use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Invalid server url '{url}': {message} {location}")]
    InvalidUrl {
        url: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport not allowed: {message} {location}")]
    TransportNotAllowed {
        message: String,
        location: ErrorLocation,
    },

    #[error("No connect acknowledgement within {}ms {location}", .timeout.as_millis())]
    HandshakeTimeout {
        timeout: Duration,
        location: ErrorLocation,
    },

    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Invalid packet: {message} {location}")]
    InvalidPacket {
        message: String,
        location: ErrorLocation,
    },

    #[error("Packet encode failed: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("WebSocket error: {source} {location}")]
    Socket {
        #[source]
        source: Box<tokio_tungstenite::tungstenite::Error>,
        location: ErrorLocation,
    },
}

impl WsError {
    /// Stable code for logs and exit messages
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "INVALID_URL",
            Self::TransportNotAllowed { .. } => "TRANSPORT_NOT_ALLOWED",
            Self::HandshakeTimeout { .. } => "HANDSHAKE_TIMEOUT",
            Self::ConnectionClosed { .. } => "CONNECTION_CLOSED",
            Self::InvalidPacket { .. } => "INVALID_PACKET",
            Self::Encode { .. } => "ENCODE_ERROR",
            Self::Socket { .. } => "SOCKET_ERROR",
        }
    }

    #[track_caller]
    pub fn connection_closed<S: Into<String>>(reason: S) -> Self {
        Self::ConnectionClosed {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for WsError {
    #[track_caller]
    fn from(source: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Socket {
            source: Box::new(source),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
