use crate::ShutdownGuard;

use std::sync::Arc;

use tokio::sync::watch;

/// Tells open connections the server is being released.
///
/// Backed by a watch channel so guards created after `shutdown()` still
/// observe it.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            shutdown_tx: Arc::new(shutdown_tx),
        }
    }

    /// Get a receiver for shutdown notifications
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Trigger shutdown
    pub fn shutdown(&self) {
        log::info!("Shutdown signal received, notifying all connections");
        self.shutdown_tx.send_replace(true);
    }

    /// Clear a previous shutdown so the server can be hosted again
    pub fn reset(&self) {
        self.shutdown_tx.send_replace(false);
    }

    /// Check if shutdown has been triggered (non-blocking)
    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    /// Convenience method to create a guard (used in connection tasks)
    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
