use crate::{HarnessError, RetryPolicy, expect_eq, retry_until};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

fn policy(interval_ms: u64, deadline_ms: u64) -> RetryPolicy {
    RetryPolicy::new(
        Duration::from_millis(interval_ms),
        Duration::from_millis(deadline_ms),
    )
    .unwrap()
}

#[tokio::test]
async fn given_condition_already_true_when_polled_then_returns_on_first_attempt() {
    let started = Instant::now();

    let attempts = retry_until(&policy(100, 1_000), || expect_eq("count", 1, 1))
        .await
        .unwrap();

    assert_eq!(attempts, 1);
    assert!(started.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn given_condition_that_becomes_true_when_polled_then_succeeds_early() {
    // Given - the count reaches 1 on the third evaluation
    let evaluations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evaluations);

    // When
    let attempts = retry_until(&policy(20, 2_000), move || {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        expect_eq("count", 1, usize::from(n >= 3))
    })
    .await
    .unwrap();

    // Then
    assert_eq!(attempts, 3);
    assert_eq!(evaluations.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn given_condition_never_true_when_polled_then_times_out_after_deadline() {
    // Given
    let interval = Duration::from_millis(50);
    let deadline = Duration::from_millis(400);
    let started = Instant::now();

    // When
    let result = retry_until(&RetryPolicy::new(interval, deadline).unwrap(), || {
        expect_eq("disconnect calls", 1, 0)
    })
    .await;

    // Then
    let elapsed = started.elapsed();
    assert!(elapsed >= deadline, "failed early after {elapsed:?}");
    assert!(
        elapsed < deadline + interval * 4,
        "failed late after {elapsed:?}"
    );

    let Err(HarnessError::AssertionTimeout {
        mismatch, attempts, ..
    }) = result
    else {
        panic!("expected an assertion timeout");
    };
    assert_eq!(mismatch.description, "disconnect calls");
    assert_eq!(mismatch.expected, "1");
    assert_eq!(mismatch.observed, "0");
    assert!(attempts >= 2);
}

#[tokio::test]
async fn given_changing_mismatch_when_timed_out_then_last_mismatch_reported() {
    let evaluations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evaluations);

    let result = retry_until(&policy(10, 100), move || {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        expect_eq("evaluation", 0, n)
    })
    .await;

    let total = evaluations.load(Ordering::SeqCst);
    let Err(e) = result else {
        panic!("expected failure");
    };
    assert_eq!(e.kind(), "ASSERTION_TIMEOUT");
    assert_eq!(e.mismatch().unwrap().observed, total.to_string());
}
