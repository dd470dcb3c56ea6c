use crate::WsError;

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[track_caller]
    pub fn parse(value: &str) -> Result<Self, WsError> {
        let uuid = Uuid::parse_str(value).map_err(|_| WsError::InvalidPacket {
            message: format!("Invalid connection id: {}", value),
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(Self(uuid))
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
