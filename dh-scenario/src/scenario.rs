use crate::{Result as ScenarioErrorResult, ScenarioReport};

use dh_config::Config;
use dh_harness::{
    ConnectionDriver, DEFAULT_ROUTE_BODY, EventSpy, HarnessError, Result as HarnessResult,
    RetryPolicy, ServerLifecycle, check, expect_eq, retry_until, with_server,
};
use dh_ws::{DISCONNECT_EVENT, EventServer};

use std::time::Duration;

use log::info;

/// Run the disconnect scenario once.
///
/// Hosts the server, checks the placeholder route, connects and
/// disconnects one websocket session, then polls the spy until exactly one
/// `disconnect` was observed. The server is released on every path.
pub async fn run(config: &Config) -> ScenarioErrorResult<ScenarioReport> {
    let policy = RetryPolicy::try_from(&config.retry)?;
    let lifecycle = ServerLifecycle::new(config.server.clone());
    let driver = ConnectionDriver::from_config(&config.client);
    let http_timeout = config.client.http_timeout();

    let events = EventServer::new();
    let spy = EventSpy::new();
    spy.attach(DISCONNECT_EVENT, &events);
    let observer = spy.clone();

    let report = with_server(&lifecycle, &events, move |url| async move {
        sanity_check(&url, http_timeout).await?;

        let mut session = driver.connect(&url).await?;
        driver.hold(&session).await;
        driver.disconnect(&mut session).await?;

        let attempts = retry_until(&policy, || {
            expect_eq("disconnect calls", 1, observer.call_count())
        })
        .await?;

        Ok(ScenarioReport {
            url,
            session_id: session.sid(),
            attempts,
            disconnects: Vec::new(),
        })
    })
    .await?;

    // Release must not have produced a second dispatch
    check(|| expect_eq("disconnect calls after release", 1, spy.call_count()))?;

    let disconnects = spy.records();
    for record in &disconnects {
        info!(
            "disconnect called: sid={} reason={} at={}",
            record.args.sid,
            record.args.data,
            record.recorded_at.to_rfc3339()
        );
    }

    Ok(ScenarioReport {
        disconnects,
        ..report
    })
}

/// `GET /` must answer with the placeholder body
async fn sanity_check(url: &str, timeout: Duration) -> HarnessResult<()> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| HarnessError::connect(format!("cannot build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| HarnessError::connect(format!("GET {url} failed: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| HarnessError::connect(format!("reading GET {url} body failed: {e}")))?;

    check(|| expect_eq("GET / status", 200, status.as_u16()))?;
    check(|| expect_eq("GET / body", DEFAULT_ROUTE_BODY, body.as_str()))?;

    info!("GET {url} -> {status} {body:?}");
    Ok(())
}
