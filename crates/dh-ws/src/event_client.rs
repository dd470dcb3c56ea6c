use crate::{
    ClientOptions, ConnectionId, Packet, Result as WsErrorResult, SOCKET_PATH, Transport, WsError,
    is_reserved_event,
};

use std::panic::Location;

use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use log::{debug, info};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Client side of the real-time protocol
pub struct EventClient {
    sid: ConnectionId,
    transport: Transport,
    stream: Option<WsStream>,
}

impl EventClient {
    /// Connect to `server_url` (e.g. `http://127.0.0.1:8328/`) and wait for
    /// the server's acknowledgement.
    pub async fn connect(server_url: &str, options: &ClientOptions) -> WsErrorResult<Self> {
        let transport = options.validate()?;
        let url = socket_url(server_url)?;
        debug!("Connecting to {url}");

        let handshake = async {
            let (mut stream, _response) = connect_async(url.as_str()).await?;
            let sid = await_ack(&mut stream).await?;
            Ok::<_, WsError>((stream, sid))
        };

        let (stream, sid) = tokio::time::timeout(options.connect_timeout, handshake)
            .await
            .map_err(|_| WsError::HandshakeTimeout {
                timeout: options.connect_timeout,
                location: ErrorLocation::from(Location::caller()),
            })??;

        info!("Connected to {url} as {sid}");

        Ok(Self {
            sid,
            transport,
            stream: Some(stream),
        })
    }

    pub fn sid(&self) -> ConnectionId {
        self.sid
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Send a named event to the server
    pub async fn emit(&mut self, name: &str, data: Value) -> WsErrorResult<()> {
        if is_reserved_event(name) {
            return Err(WsError::InvalidPacket {
                message: format!("'{name}' is reserved"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| WsError::connection_closed("client is disconnected"))?;

        let packet = Packet::Event {
            name: name.to_string(),
            data,
        }
        .encode()?;
        stream.send(Message::text(packet)).await?;
        Ok(())
    }

    /// Send the disconnect packet and the close frame.
    ///
    /// Returns once both are written; the server processes them
    /// asynchronously. Calling it again is a no-op.
    pub async fn disconnect(&mut self) -> WsErrorResult<()> {
        let Some(mut stream) = self.stream.take() else {
            debug!("Connection {} already disconnected", self.sid);
            return Ok(());
        };

        let packet = Packet::Disconnect.encode()?;
        let sent = match stream.send(Message::text(packet)).await {
            Ok(()) => stream.close(None).await,
            Err(e) => Err(e),
        };

        match sent {
            Ok(()) => {
                info!("Disconnected {}", self.sid);
                Ok(())
            }
            // The server already went away; the session is closed either way
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                debug!("Connection {} was already closed by the server", self.sid);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Read frames until the connect acknowledgement arrives
async fn await_ack(stream: &mut WsStream) -> WsErrorResult<ConnectionId> {
    while let Some(msg) = stream.next().await {
        match msg? {
            Message::Text(text) => match Packet::decode(text.as_str())? {
                Packet::Connect { sid } => return Ok(sid),
                other => debug!("Ignoring {other:?} before acknowledgement"),
            },
            Message::Close(frame) => {
                return Err(WsError::connection_closed(format!(
                    "server closed before acknowledging: {frame:?}"
                )));
            }
            _ => {}
        }
    }

    Err(WsError::connection_closed(
        "stream ended before acknowledgement",
    ))
}

/// Map an http(s)/ws(s) server url to the websocket endpoint url
#[track_caller]
pub fn socket_url(server_url: &str) -> WsErrorResult<String> {
    let trimmed = server_url.trim();

    let rest = if let Some(rest) = trimmed.strip_prefix("http://") {
        ("ws://", rest)
    } else if let Some(rest) = trimmed.strip_prefix("https://") {
        ("wss://", rest)
    } else if let Some(rest) = trimmed.strip_prefix("ws://") {
        ("ws://", rest)
    } else if let Some(rest) = trimmed.strip_prefix("wss://") {
        ("wss://", rest)
    } else {
        return Err(WsError::InvalidUrl {
            url: server_url.to_string(),
            message: "expected an http, https, ws or wss scheme".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let (scheme, authority) = rest;
    let authority = authority.trim_end_matches('/');
    if authority.is_empty() {
        return Err(WsError::InvalidUrl {
            url: server_url.to_string(),
            message: "missing host".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(format!(
        "{scheme}{authority}{SOCKET_PATH}?transport={}",
        Transport::WebSocket
    ))
}
