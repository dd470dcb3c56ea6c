mod common;

use common::{EnvGuard, setup_config_dir};

use dh_config::{Config, HostMode, Transport};
use dh_scenario::{ScenarioError, run};
use dh_ws::DisconnectReason;

use std::net::TcpListener;

use googletest::prelude::*;
use serde_json::json;
use serial_test::serial;

async fn scenario_passes(mode: HostMode) {
    // Given
    let mut config = Config::default();
    config.server.host_mode = mode;

    // When
    let report = run(&config).await.unwrap();

    // Then
    assert_that!(report.disconnects, len(eq(1)));
    let only = &report.disconnects[0];
    assert_that!(only.args.sid, eq(report.session_id));
    assert_that!(
        only.args.data,
        eq(&json!(DisconnectReason::ClientDisconnect.as_str()))
    );
    assert!(report.attempts >= 1);
    assert!(report.url.starts_with("http://127.0.0.1:"));
}

#[tokio::test]
async fn given_task_host_when_scenario_runs_then_single_disconnect_observed() {
    scenario_passes(HostMode::Task).await;
}

#[tokio::test]
async fn given_thread_host_when_scenario_runs_then_single_disconnect_observed() {
    scenario_passes(HostMode::Thread).await;
}

#[tokio::test]
async fn given_hold_when_scenario_runs_then_still_passes() {
    let mut config = Config::default();
    config.client.hold_ms = 100;

    let report = run(&config).await.unwrap();

    assert_that!(report.disconnects, len(eq(1)));
}

#[tokio::test]
async fn given_held_port_when_scenario_runs_then_bind_error() {
    // Given
    let holder = TcpListener::bind("127.0.0.1:0").unwrap();
    let mut config = Config::default();
    config.server.port = holder.local_addr().unwrap().port();

    // When
    let result = run(&config).await;

    // Then
    let Err(e) = result else {
        panic!("scenario ran on a held port");
    };
    assert_that!(e.kind(), eq("BIND_ERROR"));
}

#[tokio::test]
async fn given_polling_allowed_when_scenario_runs_then_connect_error() {
    let mut config = Config::default();
    config.client.transports = vec![Transport::WebSocket, Transport::Polling];

    let result = run(&config).await;

    assert!(matches!(result, Err(ScenarioError::Harness(_))));
    assert_that!(result.map(|_| ()).unwrap_err().kind(), eq("CONNECT_ERROR"));
}

#[tokio::test]
async fn given_invalid_retry_policy_when_scenario_runs_then_invalid_policy() {
    let mut config = Config::default();
    config.retry.interval_ms = 500;
    config.retry.deadline_ms = 100;

    let result = run(&config).await;

    let Err(e) = result else {
        panic!("scenario accepted an invalid retry policy");
    };
    assert_that!(e.kind(), eq("INVALID_POLICY"));
}

#[tokio::test]
#[serial]
async fn given_config_file_with_thread_mode_when_loaded_then_scenario_passes() {
    // Given
    let (_temp, _guard) = setup_config_dir(
        r#"
[server]
host_mode = "thread"

[retry]
interval_ms = 50
deadline_ms = 3000
"#,
    );
    let _level = EnvGuard::set("DH_LOG_LEVEL", "debug");

    // When
    let config = Config::load().unwrap();
    config.validate().unwrap();
    let report = run(&config).await.unwrap();

    // Then
    assert_that!(config.server.host_mode, eq(HostMode::Thread));
    assert_that!(report.disconnects, len(eq(1)));
}
