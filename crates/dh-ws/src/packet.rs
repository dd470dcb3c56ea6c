use crate::{ConnectionId, Result as WsErrorResult, WsError};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Real-time protocol packet, carried as a JSON text frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Packet {
    /// Server → client acknowledgement carrying the session id
    Connect { sid: ConnectionId },
    /// Client → server named event
    Event {
        name: String,
        #[serde(default)]
        data: Value,
    },
    /// Client → server graceful disconnect, sent before the close frame
    Disconnect,
}

impl Packet {
    #[track_caller]
    pub fn encode(&self) -> WsErrorResult<String> {
        serde_json::to_string(self).map_err(|source| WsError::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    pub fn decode(text: &str) -> WsErrorResult<Self> {
        serde_json::from_str(text).map_err(|e| WsError::InvalidPacket {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
