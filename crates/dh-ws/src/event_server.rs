use crate::{ConnectionRegistry, EventArgs, EventHandler, SOCKET_PATH, ShutdownCoordinator, ShutdownGuard, handler};

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use axum::{Router, routing::get};
use log::{debug, error};

type HandlerMap = HashMap<String, Vec<Arc<dyn EventHandler>>>;

/// Server side of the real-time protocol.
///
/// Cheap to clone; clones share handlers, connections and the shutdown
/// signal. Handlers may be registered before or after the server starts.
#[derive(Clone)]
pub struct EventServer {
    handlers: Arc<RwLock<HandlerMap>>,
    registry: ConnectionRegistry,
    shutdown: ShutdownCoordinator,
}

impl EventServer {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            registry: ConnectionRegistry::new(),
            shutdown: ShutdownCoordinator::new(),
        }
    }

    /// Register `handler` for every future dispatch of `event`
    pub fn on<H>(&self, event: impl Into<String>, handler: H)
    where
        H: EventHandler + 'static,
    {
        let event = event.into();
        debug!("Handler registered for '{event}'");
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event)
            .or_default()
            .push(Arc::new(handler));
    }

    /// Mount the real-time endpoint on `router`
    pub fn attach(&self, router: Router) -> Router {
        router.merge(
            Router::new()
                .route(SOCKET_PATH, get(handler))
                .with_state::<()>(self.clone()),
        )
    }

    /// Invoke every handler registered for `event`; returns how many ran
    pub fn dispatch(&self, event: &str, args: &EventArgs) -> usize {
        // Clone the list so handlers run without holding the lock
        let handlers: Vec<Arc<dyn EventHandler>> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .cloned()
            .unwrap_or_default();

        debug!(
            "Dispatching '{event}' for connection {} to {} handler(s)",
            args.sid,
            handlers.len()
        );

        for handler in &handlers {
            handler.handle(args);
        }

        handlers.len()
    }

    /// [`dispatch`](Self::dispatch) on the blocking pool, so slow handlers
    /// never stall the runtime driving connections and shutdown timers.
    /// Handlers still run one event at a time for the awaiting connection.
    pub async fn dispatch_blocking(&self, event: &str, args: EventArgs) -> usize {
        let server = self.clone();
        let name = event.to_string();

        match tokio::task::spawn_blocking(move || server.dispatch(&name, &args)).await {
            Ok(count) => count,
            Err(e) => {
                error!("Handler for '{event}' panicked: {e}");
                0
            }
        }
    }

    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .map_or(0, Vec::len)
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn connection_count(&self) -> usize {
        self.registry.total_count()
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.is_shutdown()
    }

    /// Refuse new connections and close open ones
    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    /// Accept connections again after a previous `shutdown`
    pub fn reset(&self) {
        self.shutdown.reset();
    }

    /// Wait until every connection task has finished, including its
    /// `disconnect` dispatch
    pub async fn wait_idle(&self) {
        self.registry.wait_idle().await;
    }

    pub(crate) fn shutdown_guard(&self) -> ShutdownGuard {
        self.shutdown.subscribe_guard()
    }
}

impl Default for EventServer {
    fn default() -> Self {
        Self::new()
    }
}
