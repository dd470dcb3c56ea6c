use crate::{LifecycleState, Result as HarnessResult, ServerHost};

use std::net::SocketAddr;
use std::time::Duration;

use log::{debug, info, warn};

/// One running server, returned by
/// [`ServerLifecycle::acquire`](crate::ServerLifecycle::acquire).
///
/// Not reusable after release. Dropping a handle that is still running
/// signals the host to stop so the port is not leaked.
pub struct ServerHandle {
    addr: SocketAddr,
    state: LifecycleState,
    host: Box<dyn ServerHost>,
    shutdown_grace: Duration,
}

impl ServerHandle {
    pub(crate) fn new(addr: SocketAddr, host: Box<dyn ServerHost>, shutdown_grace: Duration) -> Self {
        Self {
            addr,
            state: LifecycleState::Running,
            host,
            shutdown_grace,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Base url of the hosted server, e.g. `http://127.0.0.1:8328/`
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Stop accepting, drain every connection, close the listener.
    ///
    /// Returns once the port is free again. Releasing twice is a no-op.
    pub async fn release(&mut self) -> HarnessResult<()> {
        if self.state != LifecycleState::Running {
            debug!("Server on {} already {}", self.addr, self.state);
            return Ok(());
        }

        info!("Releasing {} server on {}", self.host.mode(), self.addr);
        self.state = LifecycleState::Stopping;

        let result = self.host.stop(self.shutdown_grace).await;
        self.state = LifecycleState::Stopped;

        match &result {
            Ok(()) => info!("Server on {} stopped", self.addr),
            Err(e) => warn!("Server on {} stopped uncleanly: {e}", self.addr),
        }

        result
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if self.state == LifecycleState::Running {
            warn!("Server on {} dropped without release, signalling stop", self.addr);
            self.host.signal_stop();
        }
    }
}
