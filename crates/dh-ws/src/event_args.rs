use crate::ConnectionId;

use serde_json::Value;

/// Arguments handed to an event handler
#[derive(Debug, Clone, PartialEq)]
pub struct EventArgs {
    /// Connection the event belongs to
    pub sid: ConnectionId,
    /// Event payload (`Null` for `connect`, the reason string for `disconnect`)
    pub data: Value,
}

impl EventArgs {
    pub fn new(sid: ConnectionId, data: Value) -> Self {
        Self { sid, data }
    }
}
