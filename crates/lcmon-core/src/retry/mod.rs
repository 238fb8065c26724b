//! Retry and backoff policy.
//!
//! This module encapsulates error classification (timeouts, refused or
//! dropped connections, protocol mismatches) and jittered exponential backoff
//! so the monitor only has to describe a single attempt.

mod classify;
mod policy;
mod run;

pub use classify::classify;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, Sleep, ThreadSleep};
