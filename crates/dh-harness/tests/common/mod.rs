#![allow(dead_code)]

use dh_config::ServerConfig;
use dh_harness::{HostMode, RetryPolicy, ServerLifecycle};

use std::net::TcpListener;
use std::time::Duration;

pub const BOTH_MODES: [HostMode; 2] = [HostMode::Task, HostMode::Thread];

/// Lifecycle on an OS-assigned loopback port
pub fn lifecycle(mode: HostMode) -> ServerLifecycle {
    ServerLifecycle::new(ServerConfig {
        host_mode: mode,
        ..ServerConfig::default()
    })
}

/// Lifecycle whose drain must finish within one second
pub fn lifecycle_with_grace(mode: HostMode) -> ServerLifecycle {
    ServerLifecycle::new(ServerConfig {
        host_mode: mode,
        shutdown_grace_secs: 1,
        ..ServerConfig::default()
    })
}

pub fn is_port_free(port: u16) -> bool {
    TcpListener::bind(("127.0.0.1", port)).is_ok()
}

/// Poll until `port` can be bound again or `limit` elapses
pub async fn wait_port_free(port: u16, limit: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    loop {
        if is_port_free(port) {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

pub fn quick_policy() -> RetryPolicy {
    RetryPolicy::new(Duration::from_millis(50), Duration::from_millis(600))
        .expect("valid policy")
}
