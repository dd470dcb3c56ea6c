use crate::{ConnectionId, ConnectionInfo, Transport};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;
use tokio::sync::watch;

/// Registry for tracking active WebSocket connections.
///
/// The live count is mirrored into a watch channel so shutdown can wait for
/// the registry to drain.
#[derive(Clone)]
pub struct ConnectionRegistry {
    inner: Arc<Mutex<RegistryInner>>,
    count_tx: Arc<watch::Sender<usize>>,
}

struct RegistryInner {
    /// All active connections by connection_id
    connections: HashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        let (count_tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                connections: HashMap::new(),
            })),
            count_tx: Arc::new(count_tx),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new connection. Unregistered when the returned guard drops.
    pub fn register(&self, transport: Transport) -> RegisteredConnection {
        let connection_id = ConnectionId::new();
        let info = ConnectionInfo {
            connection_id,
            transport,
            connected_at: chrono::Utc::now(),
        };

        let mut inner = self.lock();
        inner.connections.insert(connection_id, info);
        let total = inner.connections.len();
        self.count_tx.send_replace(total);
        drop(inner);

        info!("Registered connection {connection_id} ({total} total)");

        RegisteredConnection {
            connection_id,
            registry: self.clone(),
        }
    }

    /// Unregister a connection
    pub fn unregister(&self, connection_id: ConnectionId) {
        let mut inner = self.lock();

        if let Some(info) = inner.connections.remove(&connection_id) {
            let remaining = inner.connections.len();
            self.count_tx.send_replace(remaining);
            drop(inner);

            let open_ms = (chrono::Utc::now() - info.connected_at).num_milliseconds();
            info!(
                "Unregistered {} connection {connection_id} after {open_ms}ms ({remaining} total remaining)",
                info.transport
            );
        }
    }

    /// Get total connection count
    pub fn total_count(&self) -> usize {
        *self.count_tx.borrow()
    }

    /// Wait until no connection is registered
    pub async fn wait_idle(&self) {
        let mut count_rx = self.count_tx.subscribe();
        // The sender lives in self, so the channel cannot close here
        let _ = count_rx.wait_for(|count| *count == 0).await;
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration handle; unregisters its connection on drop.
///
/// Dropping it also covers upgrades that never complete.
pub struct RegisteredConnection {
    connection_id: ConnectionId,
    registry: ConnectionRegistry,
}

impl RegisteredConnection {
    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }
}

impl Drop for RegisteredConnection {
    fn drop(&mut self) {
        self.registry.unregister(self.connection_id);
    }
}
