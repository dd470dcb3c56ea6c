use std::fmt;

/// Why a connection's receive loop ended.
///
/// Carried as the payload of the `disconnect` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The client sent a disconnect packet
    ClientDisconnect,
    /// The socket closed without a disconnect packet
    TransportClose,
    /// The socket failed
    TransportError,
    /// The server is being released
    ServerShutdown,
}

impl DisconnectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientDisconnect => "client namespace disconnect",
            Self::TransportClose => "transport close",
            Self::TransportError => "transport error",
            Self::ServerShutdown => "server shutting down",
        }
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
