use crate::server_host::{check_drain_time, serve};
use crate::{HarnessError, HostMode, Result as HarnessResult, ServerHost};

use dh_ws::EventServer;

use std::io;
use std::net::TcpListener as StdTcpListener;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use log::{error, warn};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;

/// Runs the server as a task on the caller's tokio runtime
#[derive(Default)]
pub struct TaskHost {
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<io::Result<()>>>,
}

impl TaskHost {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServerHost for TaskHost {
    fn mode(&self) -> HostMode {
        HostMode::Task
    }

    async fn start(
        &mut self,
        listener: StdTcpListener,
        app: Router,
        events: EventServer,
    ) -> HarnessResult<()> {
        let listener = TcpListener::from_std(listener)
            .map_err(|e| HarnessError::startup(format!("listener rejected by runtime: {e}")))?;

        let (ready_tx, ready_rx) = oneshot::channel::<()>();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let _ = ready_tx.send(());
            serve(listener, app, events, stop_rx).await
        });

        self.stop_tx = Some(stop_tx);
        self.task = Some(task);

        ready_rx
            .await
            .map_err(|_| HarnessError::startup("server task exited before signalling ready"))
    }

    fn signal_stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }

    async fn stop(&mut self, grace: Duration) -> HarnessResult<()> {
        self.signal_stop();

        let Some(mut task) = self.task.take() else {
            return Ok(());
        };

        let started = Instant::now();

        match tokio::time::timeout(grace, &mut task).await {
            Ok(joined) => {
                task_outcome(joined)?;
                check_drain_time(started.elapsed(), grace)
            }
            Err(_) => {
                warn!(
                    "Drain exceeded {}ms, aborting server task",
                    grace.as_millis()
                );
                task.abort();
                // Wait for the abort so the listener is dropped
                let _ = task.await;
                Err(HarnessError::shutdown_timeout(grace))
            }
        }
    }
}

impl Drop for TaskHost {
    fn drop(&mut self) {
        self.signal_stop();
    }
}

/// Map a joined server task onto the release result
pub(crate) fn task_outcome(joined: Result<io::Result<()>, JoinError>) -> HarnessResult<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!("Server task failed: {e}");
            Err(HarnessError::shutdown(format!("server task failed: {e}")))
        }
        Err(e) => {
            error!("Server task panicked or was cancelled: {e}");
            Err(HarnessError::shutdown(format!(
                "server task panicked or was cancelled: {e}"
            )))
        }
    }
}
