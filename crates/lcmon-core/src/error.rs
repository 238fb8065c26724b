//! Error type for a single fetch attempt.
//!
//! Kept as a typed enum so the retry layer can classify failures before
//! they are reported.

use std::io;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The endpoint template produced something that is not a URL.
    #[error("invalid endpoint address {address}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: url::ParseError,
    },

    /// A configured header name or value cannot be sent on the wire.
    #[error("invalid header {name}")]
    InvalidHeader { name: String },

    /// Host name did not resolve to any socket address.
    #[error("could not resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    /// TCP connect was refused or otherwise failed.
    #[error("connection to {address} failed: {source}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Connect, handshake or receive did not complete in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The WebSocket upgrade was rejected or broke off.
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// Transport error after the connection was established.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// Remote closed the connection before sending a data message.
    #[error("connection closed before a message arrived")]
    Closed,

    /// A message arrived but is not an integer count.
    #[error("unexpected payload {payload:?}")]
    UnexpectedPayload { payload: String },
}

impl FetchError {
    /// Map an I/O error raised while waiting on the socket. Read timeouts
    /// surface as `WouldBlock` on Unix and `TimedOut` on Windows.
    pub fn from_socket_io(err: io::Error, timeout: Duration) -> Self {
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => FetchError::Timeout(timeout),
            _ => FetchError::WebSocket(tungstenite::Error::Io(err)),
        }
    }
}
