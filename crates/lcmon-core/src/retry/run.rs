//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::policy::{RetryDecision, RetryPolicy};
use crate::error::FetchError;
use std::time::Duration;

/// Blocking pause between attempts.
pub trait Sleep {
    fn sleep(&mut self, d: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&mut self, d: Duration) {
        std::thread::sleep(d);
    }
}

impl<F: FnMut(Duration)> Sleep for F {
    fn sleep(&mut self, d: Duration) {
        self(d)
    }
}

/// Runs a closure until it succeeds or the retry policy says to stop.
/// The closure receives the 1-based attempt number. On retryable failure,
/// sleeps for the backoff duration then tries again.
pub fn run_with_retry<T, S, F>(policy: &RetryPolicy, sleeper: &mut S, mut f: F) -> Result<T, FetchError>
where
    S: Sleep + ?Sized,
    F: FnMut(u32) -> Result<T, FetchError>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryAfter(d) => {
                        tracing::info!(attempt, ?kind, delay = ?d, error = %e, "retrying");
                        sleeper.sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}
