use crate::{
    HarnessError, Result as HarnessResult, ServerHandle, ServerHost, bind_listener, build_router,
    host_for,
};

use dh_config::ServerConfig;
use dh_ws::EventServer;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use log::{error, info};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout_at};

/// Starts and stops hosted servers according to a [`ServerConfig`].
#[derive(Debug, Clone)]
pub struct ServerLifecycle {
    config: ServerConfig,
}

impl ServerLifecycle {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Start a server for `events` on `port` (0 = OS-assigned).
    ///
    /// Resolves only once the server accepts TCP connections: the host
    /// signals ready, then a probe connection succeeds, both within the
    /// startup timeout.
    pub async fn acquire(&self, port: u16, events: &EventServer) -> HarnessResult<ServerHandle> {
        let requested = format!("{}:{}", self.config.host, port);
        let listener = bind_listener(&requested, self.config.bind_timeout()).await?;
        let addr = listener
            .local_addr()
            .map_err(|e| HarnessError::startup(format!("listener has no local address: {e}")))?;

        // A previous release leaves the event server refusing connections
        events.reset();

        let mut host = host_for(self.config.host_mode);
        let deadline = Instant::now() + self.config.startup_timeout();
        let startup_secs = self.config.startup_timeout_secs;

        let started = timeout_at(
            deadline,
            host.start(listener, build_router(events), events.clone()),
        )
        .await;

        match started {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                host.signal_stop();
                return Err(HarnessError::startup(format!(
                    "no ready signal within {startup_secs}s"
                )));
            }
        }

        if let Err(e) = probe(addr, deadline).await {
            self.abandon(host.as_mut()).await;
            return Err(e);
        }

        info!("{} server ready on {addr}", host.mode());
        Ok(ServerHandle::new(addr, host, self.config.shutdown_grace()))
    }

    /// Release `handle`; see [`ServerHandle::release`]
    pub async fn release(&self, handle: &mut ServerHandle) -> HarnessResult<()> {
        handle.release().await
    }

    async fn abandon(&self, host: &mut dyn ServerHost) {
        if let Err(e) = host.stop(self.config.shutdown_grace()).await {
            error!("Stopping a server that never became ready failed: {e}");
        }
    }
}

/// Connect once to `addr`; an unspecified bind address is probed on
/// loopback.
async fn probe(addr: SocketAddr, deadline: Instant) -> HarnessResult<()> {
    let target = match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => SocketAddr::new(Ipv4Addr::LOCALHOST.into(), addr.port()),
        IpAddr::V6(ip) if ip.is_unspecified() => SocketAddr::new(Ipv6Addr::LOCALHOST.into(), addr.port()),
        _ => addr,
    };

    match timeout_at(deadline, TcpStream::connect(target)).await {
        Ok(Ok(_stream)) => Ok(()),
        Ok(Err(e)) => Err(HarnessError::startup(format!(
            "readiness probe to {target} failed: {e}"
        ))),
        Err(_) => Err(HarnessError::startup(format!(
            "readiness probe to {target} timed out"
        ))),
    }
}

/// Acquire a server on the configured port, run `body` with its url, and
/// release it whatever `body` returned.
///
/// A body error wins over a release error; the latter is logged.
pub async fn with_server<F, Fut, T>(
    lifecycle: &ServerLifecycle,
    events: &EventServer,
    body: F,
) -> HarnessResult<T>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = HarnessResult<T>>,
{
    let mut handle = lifecycle.acquire(lifecycle.config().port, events).await?;

    let outcome = body(handle.url()).await;
    let released = handle.release().await;

    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(shutdown)) => {
            error!("Release after a failed run also failed: {shutdown}");
            Err(e)
        }
    }
}
