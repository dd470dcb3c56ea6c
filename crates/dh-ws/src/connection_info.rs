use crate::{ConnectionId, Transport};

use chrono::{DateTime, Utc};

/// Metadata about an active connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    pub transport: Transport,
    pub connected_at: DateTime<Utc>,
}
