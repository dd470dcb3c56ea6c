pub mod client_options;
pub mod connection_id;
pub mod connection_info;
pub mod connection_registry;
pub mod disconnect_reason;
pub mod error;
pub mod event_args;
pub mod event_client;
pub mod event_handler;
pub mod event_server;
pub mod handler;
pub mod packet;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod web_socket_connection;

pub use client_options::ClientOptions;
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_registry::{ConnectionRegistry, RegisteredConnection};
pub use disconnect_reason::DisconnectReason;
pub use error::{Result, WsError};
pub use event_args::EventArgs;
pub use event_client::EventClient;
pub use event_handler::EventHandler;
pub use event_server::EventServer;
pub use handler::{HandshakeQuery, handler};
pub use packet::Packet;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use web_socket_connection::WebSocketConnection;

pub use dh_config::Transport;

#[cfg(test)]
mod tests;

/// Path the real-time endpoint is mounted on
pub const SOCKET_PATH: &str = "/socket.io/";

/// Dispatched once per connection, right after the connect acknowledgement
pub const CONNECT_EVENT: &str = "connect";

/// Dispatched exactly once per connection, after its receive loop ends
pub const DISCONNECT_EVENT: &str = "disconnect";

/// Event names clients may not emit themselves
pub fn is_reserved_event(name: &str) -> bool {
    name == CONNECT_EVENT || name == DISCONNECT_EVENT
}
