//! Live viewer counts for a single resource key.
//!
//! One fetch is: build the address, then up to `max_attempts` times open a
//! connection, wait for the single message the service pushes on connect,
//! release the connection, and parse the message as an integer. Connection
//! faults are retried with jittered backoff; a payload that is not a number
//! is final.

use crate::error::FetchError;
use crate::headers::HeaderSet;
use crate::key::{Endpoint, ResourceKey};
use crate::retry::{run_with_retry, RetryPolicy, Sleep, ThreadSleep};
use crate::transport::{ConnectRequest, Connection, Transport, WsTransport};
use std::fmt;
use std::time::Duration;

/// Outcome of one fetch as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchResult {
    Count(u64),
    /// Count could not be obtained; reported as [`FetchResult::SENTINEL`].
    Unavailable,
}

impl FetchResult {
    pub const SENTINEL: i64 = -1;

    /// Value printed in reports: the count, or `-1`.
    pub fn report_value(&self) -> i64 {
        match self {
            FetchResult::Count(n) => i64::try_from(*n).unwrap_or(i64::MAX),
            FetchResult::Unavailable => Self::SENTINEL,
        }
    }

    pub fn count(&self) -> Option<u64> {
        match self {
            FetchResult::Count(n) => Some(*n),
            FetchResult::Unavailable => None,
        }
    }
}

impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.report_value())
    }
}

/// Static settings for a monitor.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub endpoint: Endpoint,
    pub headers: HeaderSet,
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            headers: HeaderSet::browser(),
            connect_timeout: Duration::from_secs(15),
            retry: RetryPolicy::default(),
        }
    }
}

/// Fetches viewer counts, one key at a time.
pub struct Monitor<T = WsTransport, S = ThreadSleep> {
    settings: MonitorSettings,
    transport: T,
    sleeper: S,
}

impl Monitor {
    /// A monitor using the real WebSocket transport and thread sleeps.
    pub fn new(settings: MonitorSettings) -> Self {
        Self::with_parts(settings, WsTransport, ThreadSleep)
    }
}

impl<T: Transport, S: Sleep> Monitor<T, S> {
    pub fn with_parts(settings: MonitorSettings, transport: T, sleeper: S) -> Self {
        Self {
            settings,
            transport,
            sleeper,
        }
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    /// Fetch the count for `key`, logging and folding any failure into
    /// [`FetchResult::Unavailable`].
    pub fn online_users(&mut self, key: &ResourceKey) -> FetchResult {
        match self.try_online_users(key) {
            Ok(n) => FetchResult::Count(n),
            Err(FetchError::UnexpectedPayload { payload }) => {
                tracing::warn!(key = %key, payload = %payload, "received unexpected format");
                FetchResult::Unavailable
            }
            Err(e) => {
                tracing::error!(key = %key, error = %e, "error fetching online users");
                FetchResult::Unavailable
            }
        }
    }

    /// Fetch the count for `key`, returning the error of the last attempt.
    pub fn try_online_users(&mut self, key: &ResourceKey) -> Result<u64, FetchError> {
        let url = self.settings.endpoint.address_for(key)?;
        let Self {
            settings,
            transport,
            sleeper,
        } = self;

        run_with_retry(&settings.retry, sleeper, |attempt| {
            tracing::debug!(key = %key, attempt, "connecting");
            let request = ConnectRequest {
                url: &url,
                headers: &settings.headers,
                timeout: settings.connect_timeout,
            };
            let mut conn = transport.connect(&request)?;
            let mut guard = CloseGuard(&mut conn);
            let payload = guard.0.receive_one()?;
            drop(guard);
            parse_count(&payload)
        })
    }
}

/// Closes the connection on every exit path of an attempt.
struct CloseGuard<'a, C: Connection>(&'a mut C);

impl<C: Connection> Drop for CloseGuard<'_, C> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Parse a message body as a non-negative base-10 integer. Surrounding
/// whitespace is tolerated; anything else is a protocol mismatch.
pub fn parse_count(payload: &[u8]) -> Result<u64, FetchError> {
    std::str::from_utf8(payload)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .ok_or_else(|| FetchError::UnexpectedPayload {
            payload: String::from_utf8_lossy(payload).into_owned(),
        })
}
