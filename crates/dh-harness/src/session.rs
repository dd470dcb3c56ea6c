use crate::SessionState;

use dh_ws::{ConnectionId, EventClient, Transport};

/// One logical client connection, owned by whoever called
/// [`ConnectionDriver::connect`](crate::ConnectionDriver::connect).
///
/// Starts out `Connected`; failed handshakes never produce a session.
pub struct Session {
    pub(crate) client: EventClient,
    pub(crate) state: SessionState,
}

impl Session {
    pub(crate) fn new(client: EventClient) -> Self {
        Self {
            client,
            state: SessionState::Connected,
        }
    }

    /// Session id assigned by the server
    pub fn sid(&self) -> ConnectionId {
        self.client.sid()
    }

    pub fn transport(&self) -> Transport {
        self.client.transport()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }

    /// Underlying client, for emitting events
    pub fn client_mut(&mut self) -> &mut EventClient {
        &mut self.client
    }
}
