use crate::EventSpy;

use dh_ws::{ConnectionId, EventArgs, EventHandler, EventServer};

use googletest::prelude::*;
use serde_json::json;

#[test]
fn given_new_spy_then_no_calls_recorded() {
    let spy = EventSpy::new();

    assert_that!(spy.call_count(), eq(0));
    assert_that!(spy.call_args(), is_empty());
    assert_that!(spy.last_call(), none());
}

#[test]
fn given_attached_spy_when_event_dispatched_then_invocation_recorded() {
    // Given
    let server = EventServer::new();
    let spy = EventSpy::new();
    spy.attach("disconnect", &server);
    let args = EventArgs::new(ConnectionId::new(), json!("client namespace disconnect"));

    // When
    server.dispatch("disconnect", &args);

    // Then
    assert_that!(spy.call_count(), eq(1));
    assert_that!(spy.call_args(), elements_are![eq(&args)]);
    assert_that!(spy.last_call(), some(eq(&args)));
}

#[test]
fn given_attached_spy_when_other_event_dispatched_then_nothing_recorded() {
    let server = EventServer::new();
    let spy = EventSpy::new();
    spy.attach("disconnect", &server);

    server.dispatch("connect", &EventArgs::new(ConnectionId::new(), json!(null)));

    assert_that!(spy.call_count(), eq(0));
}

#[test]
fn given_several_invocations_when_read_then_in_order_with_monotonic_timestamps() {
    let spy = EventSpy::new();
    let first = EventArgs::new(ConnectionId::new(), json!(1));
    let second = EventArgs::new(ConnectionId::new(), json!(2));

    spy.handle(&first);
    spy.handle(&second);

    let records = spy.records();
    assert_that!(records, len(eq(2)));
    assert_that!(records[0].args, eq(&first));
    assert_that!(records[1].args, eq(&second));
    assert!(records[0].recorded_at <= records[1].recorded_at);
}

#[test]
fn given_clone_when_original_records_then_clone_sees_it() {
    let spy = EventSpy::new();
    let reader = spy.clone();

    spy.handle(&EventArgs::new(ConnectionId::new(), json!(null)));

    assert_that!(reader.call_count(), eq(1));
}
