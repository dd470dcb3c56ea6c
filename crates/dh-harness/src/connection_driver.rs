use crate::{Result as HarnessResult, Session, SessionState};

use dh_config::ClientConfig;
use dh_ws::{ClientOptions, EventClient};

use std::time::Duration;

use log::{debug, info, warn};

/// Drives client sessions against a hosted server: connect, optionally
/// hold, disconnect.
#[derive(Debug, Clone)]
pub struct ConnectionDriver {
    options: ClientOptions,
    hold: Duration,
}

impl ConnectionDriver {
    pub fn new(options: ClientOptions, hold: Duration) -> Self {
        Self { options, hold }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(ClientOptions::from(config), config.hold())
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Open a websocket-only session.
    ///
    /// Fails with `Connect` when the transport list allows anything but
    /// websocket or the acknowledgement misses the connect timeout.
    pub async fn connect(&self, server_url: &str) -> HarnessResult<Session> {
        debug!("Session {} to {server_url}", SessionState::Connecting);

        let client = EventClient::connect(server_url, &self.options)
            .await
            .inspect_err(|e| warn!("Connect to {server_url} failed: {e}"))?;

        info!("Session {} {}", client.sid(), SessionState::Connected);
        Ok(Session::new(client))
    }

    /// Wait the configured hold time; returns immediately when it is zero
    pub async fn hold(&self, session: &Session) {
        if self.hold.is_zero() {
            return;
        }

        debug!(
            "Holding session {} for {}ms",
            session.sid(),
            self.hold.as_millis()
        );
        tokio::time::sleep(self.hold).await;
    }

    /// Send the disconnect packet and close frame.
    ///
    /// Does not wait for the server to observe them. A second call is a
    /// no-op.
    pub async fn disconnect(&self, session: &mut Session) -> HarnessResult<()> {
        if session.state == SessionState::Disconnected {
            debug!("Session {} already disconnected", session.sid());
            return Ok(());
        }

        session.state = SessionState::Disconnecting;
        let result = session.client.disconnect().await;
        // The client gives up its socket either way
        session.state = SessionState::Disconnected;

        result?;
        info!("Session {} {}", session.sid(), SessionState::Disconnected);
        Ok(())
    }
}

impl Default for ConnectionDriver {
    fn default() -> Self {
        Self::new(ClientOptions::default(), Duration::ZERO)
    }
}
