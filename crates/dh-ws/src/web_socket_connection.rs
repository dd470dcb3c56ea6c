use crate::{
    CONNECT_EVENT, ConnectionId, DISCONNECT_EVENT, DisconnectReason, EventArgs, EventServer,
    Packet, Result as WsErrorResult, ShutdownGuard, WsError, is_reserved_event,
};

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use serde_json::Value;

/// Manages a single WebSocket connection
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    server: EventServer,
}

impl WebSocketConnection {
    pub fn new(connection_id: ConnectionId, server: EventServer) -> Self {
        Self {
            connection_id,
            server,
        }
    }

    /// Handle the connection lifecycle.
    ///
    /// Once the acknowledgement is sent, `disconnect` is dispatched exactly
    /// once, whichever way the receive loop ends.
    pub async fn handle(
        self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<DisconnectReason> {
        let (mut ws_sender, mut ws_receiver) = socket.split();

        let ack = Packet::Connect {
            sid: self.connection_id,
        }
        .encode()?;

        if let Err(e) = ws_sender.send(Message::Text(ack.into())).await {
            return Err(WsError::connection_closed(format!(
                "failed to send connect acknowledgement: {e}"
            )));
        }

        log::info!("WebSocket connection {} established", self.connection_id);
        self.server
            .dispatch_blocking(CONNECT_EVENT, EventArgs::new(self.connection_id, Value::Null))
            .await;

        let reason = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            if let Some(reason) = self.handle_text(text.as_str()).await {
                                break reason;
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if ws_sender.send(Message::Pong(data)).await.is_err() {
                                break DisconnectReason::TransportError;
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            log::info!("Connection {} closed by client", self.connection_id);
                            break DisconnectReason::TransportClose;
                        }
                        Some(Ok(Message::Binary(data))) => {
                            log::debug!(
                                "Ignoring binary message ({} bytes) from connection {}",
                                data.len(),
                                self.connection_id
                            );
                        }
                        Some(Ok(Message::Pong(_))) => {}
                        Some(Err(e)) => {
                            log::error!("WebSocket error on connection {}: {}", self.connection_id, e);
                            break DisconnectReason::TransportError;
                        }
                    }
                }

                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down connection {} gracefully", self.connection_id);
                    let _ = ws_sender.send(Message::Close(None)).await;
                    break DisconnectReason::ServerShutdown;
                }
            }
        };

        self.server
            .dispatch_blocking(
                DISCONNECT_EVENT,
                EventArgs::new(self.connection_id, Value::String(reason.as_str().to_string())),
            )
            .await;

        log::info!(
            "WebSocket connection {} closed: {}",
            self.connection_id,
            reason
        );

        Ok(reason)
    }

    /// Returns a reason when the packet ends the session
    async fn handle_text(&self, text: &str) -> Option<DisconnectReason> {
        match Packet::decode(text) {
            Ok(Packet::Event { name, data }) => {
                if is_reserved_event(&name) {
                    log::warn!(
                        "Connection {} tried to emit reserved event '{}'",
                        self.connection_id,
                        name
                    );
                } else {
                    self.server
                        .dispatch_blocking(&name, EventArgs::new(self.connection_id, data))
                        .await;
                }
                None
            }
            Ok(Packet::Disconnect) => {
                log::debug!("Disconnect packet from connection {}", self.connection_id);
                Some(DisconnectReason::ClientDisconnect)
            }
            Ok(Packet::Connect { .. }) => {
                log::warn!(
                    "Ignoring connect packet sent by client {}",
                    self.connection_id
                );
                None
            }
            Err(e) => {
                log::warn!("Connection {} sent {}", self.connection_id, e);
                None
            }
        }
    }
}
