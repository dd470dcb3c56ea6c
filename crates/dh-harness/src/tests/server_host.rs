use crate::server_host::check_drain_time;
use crate::task_host::task_outcome;
use crate::thread_host::thread_outcome;
use crate::{HarnessError, HostMode, bind_listener, host_for};

use std::io;
use std::net::TcpListener;
use std::time::{Duration, Instant};

async fn failing_serve() -> io::Result<()> {
    panic!("serve loop blew up")
}

fn failing_server_thread() -> io::Result<()> {
    panic!("serve loop blew up")
}

#[tokio::test]
async fn given_free_port_when_bound_then_listener_is_non_blocking_and_local() {
    let listener = bind_listener("127.0.0.1:0", Duration::ZERO).await.unwrap();

    let addr = listener.local_addr().unwrap();
    assert!(addr.ip().is_loopback());
    assert_ne!(addr.port(), 0);
}

#[tokio::test]
async fn given_held_port_when_bound_without_wait_then_bind_error_immediately() {
    // Given
    let holder = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = holder.local_addr().unwrap().to_string();
    let started = Instant::now();

    // When
    let result = bind_listener(&addr, Duration::ZERO).await;

    // Then
    assert!(matches!(result, Err(HarnessError::Bind { .. })));
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[tokio::test]
async fn given_held_port_when_bound_with_wait_then_gives_up_after_wait() {
    let holder = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = holder.local_addr().unwrap().to_string();
    let wait = Duration::from_millis(200);
    let started = Instant::now();

    let result = bind_listener(&addr, wait).await;

    let Err(e) = result else {
        panic!("bind on a held port succeeded");
    };
    assert_eq!(e.kind(), "BIND_ERROR");
    assert!(started.elapsed() >= wait);
}

#[tokio::test]
async fn given_port_freed_during_wait_when_bound_then_succeeds() {
    // Given
    let holder = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = holder.local_addr().unwrap().to_string();
    let releaser = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(holder);
    });

    // When
    let result = bind_listener(&addr, Duration::from_secs(2)).await;

    // Then
    releaser.await.unwrap();
    assert!(result.is_ok());
}

#[test]
fn given_host_mode_when_host_created_then_reports_same_mode() {
    assert_eq!(host_for(HostMode::Task).mode(), HostMode::Task);
    assert_eq!(host_for(HostMode::Thread).mode(), HostMode::Thread);
}

#[test]
fn given_drain_within_grace_when_checked_then_ok() {
    let result = check_drain_time(Duration::from_millis(900), Duration::from_secs(1));

    assert!(result.is_ok());
}

#[test]
fn given_drain_over_grace_when_checked_then_shutdown_timeout() {
    let result = check_drain_time(Duration::from_secs(4), Duration::from_secs(1));

    let Err(e) = result else {
        panic!("an overrun drain was accepted");
    };
    assert_eq!(e.kind(), "SHUTDOWN_TIMEOUT");
}

#[tokio::test]
async fn given_panicked_server_task_when_joined_then_shutdown_error() {
    let joined = tokio::spawn(failing_serve()).await;

    let result = task_outcome(joined);

    let Err(e) = result else {
        panic!("a panicked server task was reported as a clean stop");
    };
    assert_eq!(e.kind(), "SHUTDOWN_ERROR");
}

#[test]
fn given_serve_io_error_when_task_joined_then_shutdown_error() {
    let result = task_outcome(Ok(Err(io::Error::other("accept loop died"))));

    let Err(e) = result else {
        panic!("a failed server task was reported as a clean stop");
    };
    assert_eq!(e.kind(), "SHUTDOWN_ERROR");
    assert!(e.to_string().contains("accept loop died"));
}

#[test]
fn given_panicked_server_thread_when_joined_then_shutdown_error_with_message() {
    let joined = std::thread::spawn(failing_server_thread).join();

    let result = thread_outcome(Ok(joined));

    let Err(e) = result else {
        panic!("a panicked server thread was reported as a clean stop");
    };
    assert_eq!(e.kind(), "SHUTDOWN_ERROR");
    assert!(e.to_string().contains("serve loop blew up"));
}

#[test]
fn given_serve_io_error_when_thread_joined_then_shutdown_error() {
    let result = thread_outcome(Ok(Ok(Err(io::Error::other("accept loop died")))));

    assert!(matches!(result, Err(HarnessError::Shutdown { .. })));
}

#[test]
fn given_clean_server_thread_when_joined_then_ok() {
    let result = thread_outcome(Ok(Ok(Ok(()))));

    assert!(result.is_ok());
}
