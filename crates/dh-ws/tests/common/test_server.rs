#![allow(dead_code)]

use dh_ws::EventServer;

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// EventServer served on an OS-assigned local port
pub struct TestEventServer {
    pub events: EventServer,
    pub addr: SocketAddr,
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TestEventServer {
    pub async fn start() -> Self {
        let events = EventServer::new();
        let app = events.attach(Router::new());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let shutdown_events = events.clone();
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stop_rx.await;
                    shutdown_events.shutdown();
                })
                .await;
        });

        Self {
            events,
            addr,
            stop_tx: Some(stop_tx),
            task,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        self.events.wait_idle().await;
        let _ = (&mut self.task).await;
    }
}

/// Poll `condition` every 10ms until it holds or `limit` elapses
pub async fn wait_until<F>(limit: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + limit;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
