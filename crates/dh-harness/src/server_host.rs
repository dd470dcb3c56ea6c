use crate::{HarnessError, HostMode, Result as HarnessResult, TaskHost, ThreadHost};

use dh_ws::EventServer;

use std::io;
use std::net::TcpListener as StdTcpListener;
use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use error_location::ErrorLocation;
use log::{debug, info, warn};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::Instant;

const BIND_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Where a hosted server runs.
///
/// A host owns the ready/stop signalling for one server run. `start`
/// resolves once the host has taken over the listener; `stop` resolves once
/// connections are drained and the listener is closed.
#[async_trait]
pub trait ServerHost: Send {
    fn mode(&self) -> HostMode;

    async fn start(
        &mut self,
        listener: StdTcpListener,
        app: Router,
        events: EventServer,
    ) -> HarnessResult<()>;

    /// Ask the server to stop without waiting for it
    fn signal_stop(&mut self);

    /// Stop and wait up to `grace` for the drain to finish
    async fn stop(&mut self, grace: Duration) -> HarnessResult<()>;
}

/// A fresh host for `mode`
pub fn host_for(mode: HostMode) -> Box<dyn ServerHost> {
    match mode {
        HostMode::Task => Box::new(TaskHost::new()),
        HostMode::Thread => Box::new(ThreadHost::new()),
    }
}

/// Bind `addr`, retrying a busy port until `wait` elapses.
///
/// With a zero `wait` a single attempt is made. The listener is returned
/// in non-blocking mode, ready for either host.
#[track_caller]
pub fn bind_listener(
    addr: &str,
    wait: Duration,
) -> impl Future<Output = HarnessResult<StdTcpListener>> + Send {
    let location = ErrorLocation::from(Location::caller());
    let addr = addr.to_string();

    async move {
        let deadline = Instant::now() + wait;

        let listener = loop {
            match StdTcpListener::bind(&addr) {
                Ok(listener) => break listener,
                Err(e) if e.kind() == io::ErrorKind::AddrInUse && Instant::now() < deadline => {
                    debug!("{addr} busy, retrying bind");
                    tokio::time::sleep(BIND_RETRY_INTERVAL).await;
                }
                Err(source) => {
                    return Err(HarnessError::Bind {
                        addr,
                        source,
                        location,
                    });
                }
            }
        };

        listener
            .set_nonblocking(true)
            .map_err(|source| HarnessError::Bind {
                addr: addr.clone(),
                source,
                location,
            })?;

        Ok(listener)
    }
}

/// A drain that completed but overran `grace` still counts as a timeout
#[track_caller]
pub(crate) fn check_drain_time(elapsed: Duration, grace: Duration) -> HarnessResult<()> {
    if elapsed > grace {
        warn!(
            "Drain took {}ms, over the {}ms grace",
            elapsed.as_millis(),
            grace.as_millis()
        );
        return Err(HarnessError::shutdown_timeout(grace));
    }
    Ok(())
}

/// Serve `app` until `stop_rx` fires (or its sender is dropped), then close
/// every real-time connection and wait for their `disconnect` dispatches.
///
/// The listener is closed when this returns.
pub(crate) async fn serve(
    listener: TcpListener,
    app: Router,
    events: EventServer,
    stop_rx: oneshot::Receiver<()>,
) -> io::Result<()> {
    let drain_events = events.clone();

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // A dropped sender means the handle went away: stop as well
            let _ = stop_rx.await;
            info!("Stop requested, closing connections");
            drain_events.shutdown();
        })
        .await?;

    events.wait_idle().await;
    debug!("All connections drained");
    Ok(())
}
