use rand::Rng;
use std::time::Duration;

/// High-level classification of an error for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/handshake/receive).
    Timeout,
    /// Network-level failure (refused, DNS, rejected upgrade, remote close).
    Connection,
    /// A message arrived but its content is not what the service sends.
    /// Definitive, never retried.
    Protocol,
    /// Local fault such as a malformed address (not retried).
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff with additive uniform jitter.
///
/// After failed attempt `n` (1-based) the next attempt waits
/// `base_delay * 2^n + U(0, jitter)`, capped at `max_delay`. With the
/// defaults that is 2-3s before the second attempt and 4-5s before the third.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Base delay for backoff.
    pub base_delay: Duration,
    /// Upper bound on backoff delay (jitter included).
    pub max_delay: Duration,
    /// Upper bound of the random addend; zero disables jitter.
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            jitter: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy that retries immediately. Useful for tests and local endpoints.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    /// Decide what to do after `attempt` (1-based) failed with an error of `kind`.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }

        match kind {
            ErrorKind::Protocol | ErrorKind::Other => RetryDecision::NoRetry,
            ErrorKind::Timeout | ErrorKind::Connection => {
                RetryDecision::RetryAfter(self.backoff(attempt) + self.sample_jitter())
                    .capped(self.max_delay)
            }
        }
    }

    /// Deterministic part of the delay after failed attempt `attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = 1u32 << attempt.min(16);
        self.base_delay.saturating_mul(exp).min(self.max_delay)
    }

    fn sample_jitter(&self) -> Duration {
        if self.jitter.is_zero() {
            return Duration::ZERO;
        }
        let secs = rand::rng().random_range(0.0..self.jitter.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

impl RetryDecision {
    fn capped(self, max: Duration) -> Self {
        match self {
            RetryDecision::RetryAfter(d) => RetryDecision::RetryAfter(d.min(max)),
            other => other,
        }
    }
}
