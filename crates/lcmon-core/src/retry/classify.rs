//! Classify fetch errors into retry policy error kinds.

use crate::error::FetchError;
use crate::retry::policy::ErrorKind;

/// Classify a fetch error for retry decisions.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Timeout(_) => ErrorKind::Timeout,
        FetchError::Resolve { .. }
        | FetchError::Connect { .. }
        | FetchError::Handshake(_)
        | FetchError::WebSocket(_)
        | FetchError::Closed => ErrorKind::Connection,
        FetchError::UnexpectedPayload { .. } => ErrorKind::Protocol,
        FetchError::InvalidAddress { .. } | FetchError::InvalidHeader { .. } => ErrorKind::Other,
    }
}
