use crate::{EventServer, RegisteredConnection, Transport, WebSocketConnection};

use axum::{
    extract::{
        Query, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
};
use log::{debug, error, info, warn};
use serde::Deserialize;

/// Query string of the upgrade request (`?transport=websocket`)
#[derive(Debug, Clone, Deserialize)]
pub struct HandshakeQuery {
    pub transport: Option<String>,
}

impl HandshakeQuery {
    /// Only the websocket transport is served
    pub fn transport(&self) -> Result<Transport, StatusCode> {
        let requested = self.transport.as_deref().ok_or_else(|| {
            warn!("Upgrade request without a transport parameter");
            StatusCode::BAD_REQUEST
        })?;

        match requested.parse::<Transport>() {
            Ok(Transport::WebSocket) => Ok(Transport::WebSocket),
            Ok(other) => {
                warn!("Rejected upgrade request for transport '{other}'");
                Err(StatusCode::BAD_REQUEST)
            }
            Err(e) => {
                warn!("Rejected upgrade request: {e}");
                Err(StatusCode::BAD_REQUEST)
            }
        }
    }
}

/// WebSocket upgrade handler
pub async fn handler(
    State(server): State<EventServer>,
    Query(query): Query<HandshakeQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let transport = query.transport()?;

    if server.is_shutdown() {
        warn!("Upgrade request refused, server is shutting down");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let registration = server.registry().register(transport);
    debug!(
        "WebSocket upgrade request for connection {}",
        registration.connection_id()
    );

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, registration, server)))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(socket: WebSocket, registration: RegisteredConnection, server: EventServer) {
    let connection_id = registration.connection_id();
    let shutdown_guard = server.shutdown_guard();

    let connection = WebSocketConnection::new(connection_id, server);

    match connection.handle(socket, shutdown_guard).await {
        Ok(reason) => info!("Connection {connection_id} finished: {reason}"),
        Err(e) => error!("Connection {connection_id} error: {e}"),
    }

    // Unregister only after the disconnect dispatch so drains include it
    drop(registration);
}
