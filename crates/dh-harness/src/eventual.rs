use crate::{AssertionMismatch, HarnessError, Result as HarnessResult, RetryPolicy};

use std::panic::Location;

use error_location::ErrorLocation;
use log::{debug, warn};
use tokio::time::{Instant, sleep_until};

/// Evaluate `predicate` every `policy.interval()` until it holds.
///
/// Returns the number of evaluations on success. The final evaluation
/// happens at the deadline; if it still fails, the error carries that last
/// mismatch unchanged.
#[track_caller]
pub fn retry_until<P>(
    policy: &RetryPolicy,
    predicate: P,
) -> impl Future<Output = HarnessResult<u32>> + Send
where
    P: FnMut() -> Result<(), AssertionMismatch> + Send,
{
    let location = ErrorLocation::from(Location::caller());
    let policy = *policy;
    poll(policy, predicate, location)
}

async fn poll<P>(
    policy: RetryPolicy,
    mut predicate: P,
    location: ErrorLocation,
) -> HarnessResult<u32>
where
    P: FnMut() -> Result<(), AssertionMismatch> + Send,
{
    let started = Instant::now();
    let deadline = started + policy.deadline();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;

        let mismatch = match predicate() {
            Ok(()) => {
                debug!(
                    "Condition held after {attempts} attempt(s) in {}ms",
                    started.elapsed().as_millis()
                );
                return Ok(attempts);
            }
            Err(mismatch) => mismatch,
        };

        let now = Instant::now();
        if now >= deadline {
            let elapsed = now - started;
            warn!(
                "Giving up after {attempts} attempt(s) in {}ms: {mismatch}",
                elapsed.as_millis()
            );
            return Err(HarnessError::AssertionTimeout {
                mismatch,
                attempts,
                elapsed,
                location,
            });
        }

        debug!("Attempt {attempts} did not hold: {mismatch}");
        sleep_until((now + policy.interval()).min(deadline)).await;
    }
}

/// Evaluate `predicate` once
#[track_caller]
pub fn check<P>(predicate: P) -> HarnessResult<()>
where
    P: FnOnce() -> Result<(), AssertionMismatch>,
{
    predicate().map_err(|mismatch| HarnessError::Assertion {
        mismatch,
        location: ErrorLocation::from(Location::caller()),
    })
}
