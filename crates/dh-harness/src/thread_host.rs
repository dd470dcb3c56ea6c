use crate::server_host::{check_drain_time, serve};
use crate::{HarnessError, HostMode, Result as HarnessResult, ServerHost};

use dh_ws::EventServer;

use std::io;
use std::net::TcpListener as StdTcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use log::{error, info, warn};
use tokio::net::TcpListener;
use tokio::runtime::Builder;
use tokio::sync::oneshot;
use tokio::task::JoinError;
use tokio::time::Instant;

const THREAD_NAME: &str = "dh-server";

/// Runs the server on a dedicated thread with its own current-thread
/// runtime.
#[derive(Default)]
pub struct ThreadHost {
    stop_tx: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<io::Result<()>>>,
}

impl ThreadHost {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServerHost for ThreadHost {
    fn mode(&self) -> HostMode {
        HostMode::Thread
    }

    async fn start(
        &mut self,
        listener: StdTcpListener,
        app: Router,
        events: EventServer,
    ) -> HarnessResult<()> {
        let (ready_tx, ready_rx) = oneshot::channel::<io::Result<()>>();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let thread = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || run_server(listener, app, events, ready_tx, stop_rx))
            .map_err(|e| HarnessError::startup(format!("cannot spawn server thread: {e}")))?;

        self.stop_tx = Some(stop_tx);
        self.thread = Some(thread);

        match ready_rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(HarnessError::startup(format!(
                "server thread failed to start: {e}"
            ))),
            Err(_) => Err(HarnessError::startup(
                "server thread exited before signalling ready",
            )),
        }
    }

    fn signal_stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }

    async fn stop(&mut self, grace: Duration) -> HarnessResult<()> {
        self.signal_stop();

        let Some(thread) = self.thread.take() else {
            return Ok(());
        };

        let started = Instant::now();
        let join = tokio::task::spawn_blocking(move || thread.join());

        match tokio::time::timeout(grace, join).await {
            Ok(joined) => {
                thread_outcome(joined)?;
                check_drain_time(started.elapsed(), grace)
            }
            Err(_) => {
                warn!(
                    "Drain exceeded {}ms, detaching server thread",
                    grace.as_millis()
                );
                Err(HarnessError::shutdown_timeout(grace))
            }
        }
    }
}

impl Drop for ThreadHost {
    fn drop(&mut self) {
        self.signal_stop();
    }
}

/// Map a joined server thread onto the release result
pub(crate) fn thread_outcome(
    joined: Result<thread::Result<io::Result<()>>, JoinError>,
) -> HarnessResult<()> {
    match joined {
        Ok(Ok(Ok(()))) => Ok(()),
        Ok(Ok(Err(e))) => {
            error!("Server thread failed: {e}");
            Err(HarnessError::shutdown(format!("server thread failed: {e}")))
        }
        Ok(Err(panic)) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!("Server thread panicked: {message}");
            Err(HarnessError::shutdown(format!(
                "server thread panicked: {message}"
            )))
        }
        Err(e) => {
            error!("Joining server thread failed: {e}");
            Err(HarnessError::shutdown(format!(
                "joining server thread failed: {e}"
            )))
        }
    }
}

/// Thread body: build a private runtime, report readiness, serve until stop.
///
/// Startup failures go through `ready_tx`; only serve errors are returned.
fn run_server(
    listener: StdTcpListener,
    app: Router,
    events: EventServer,
    ready_tx: oneshot::Sender<io::Result<()>>,
    stop_rx: oneshot::Receiver<()>,
) -> io::Result<()> {
    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return Ok(());
        }
    };

    let served = runtime.block_on(async move {
        let listener = match TcpListener::from_std(listener) {
            Ok(listener) => listener,
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return Ok(());
            }
        };

        let _ = ready_tx.send(Ok(()));
        serve(listener, app, events, stop_rx).await
    });

    info!("Server thread finished");
    served
}
