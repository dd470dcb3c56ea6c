use crate::ShutdownCoordinator;

use tokio::sync::watch;

/// Helper for gracefully handling shutdown in async tasks
pub struct ShutdownGuard {
    shutdown_rx: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
        }
    }

    /// Wait for shutdown signal. Resolves immediately if already triggered.
    pub async fn wait(&mut self) {
        // Err means the coordinator is gone, which also ends the connection
        let _ = self.shutdown_rx.wait_for(|triggered| *triggered).await;
    }
}
