//! Connection capability used by the monitor.
//!
//! The monitor only depends on [`Transport`] and [`Connection`]; the
//! production implementation is a blocking WebSocket client built on
//! `tungstenite`. Runs in the current thread.

use crate::error::FetchError;
use crate::headers::HeaderSet;
use std::io;
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;
use tungstenite::client::IntoClientRequest;
use tungstenite::http::{HeaderName, HeaderValue};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{HandshakeError, Message, WebSocket};
use url::Url;

/// Everything needed to open one connection.
#[derive(Debug, Clone, Copy)]
pub struct ConnectRequest<'a> {
    pub url: &'a Url,
    pub headers: &'a HeaderSet,
    /// Bound on TCP connect, the handshake, and each wait on the socket.
    pub timeout: Duration,
}

/// Opens connections. One call per attempt.
pub trait Transport {
    type Conn: Connection;

    fn connect(&mut self, request: &ConnectRequest<'_>) -> Result<Self::Conn, FetchError>;
}

/// An open connection on which the server pushes data unsolicited.
pub trait Connection {
    /// Block until one data message arrives and return its payload.
    fn receive_one(&mut self) -> Result<Vec<u8>, FetchError>;

    /// Release the connection. Errors are swallowed; the socket is gone either way.
    fn close(&mut self);
}

/// Blocking WebSocket transport (TLS for `wss://`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WsTransport;

/// A connected WebSocket.
pub struct WsConnection {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
    timeout: Duration,
}

impl Transport for WsTransport {
    type Conn = WsConnection;

    fn connect(&mut self, request: &ConnectRequest<'_>) -> Result<WsConnection, FetchError> {
        let url = request.url;
        let timeout = request.timeout;
        let host = url.host_str().unwrap_or_default().to_string();

        let addrs = url
            .socket_addrs(|| None)
            .map_err(|source| FetchError::Resolve {
                host: host.clone(),
                source,
            })?;
        let stream = connect_any(&addrs, &host, timeout)?;
        stream
            .set_read_timeout(Some(timeout))
            .and_then(|()| stream.set_write_timeout(Some(timeout)))
            .map_err(|source| FetchError::Connect {
                address: host.clone(),
                source,
            })?;
        let _ = stream.set_nodelay(true);

        let mut ws_request = url.as_str().into_client_request()?;
        for (name, value) in request.headers.iter() {
            let invalid = || FetchError::InvalidHeader {
                name: name.to_string(),
            };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            ws_request.headers_mut().insert(header_name, header_value);
        }

        match tungstenite::client_tls_with_config(ws_request, stream, None, None) {
            Ok((socket, response)) => {
                tracing::debug!(url = %url, status = %response.status(), "websocket connected");
                Ok(WsConnection { socket, timeout })
            }
            Err(HandshakeError::Interrupted(_)) => Err(FetchError::Timeout(timeout)),
            Err(HandshakeError::Failure(tungstenite::Error::Io(e))) if is_timeout(&e) => {
                Err(FetchError::Timeout(timeout))
            }
            Err(HandshakeError::Failure(e)) => Err(FetchError::Handshake(e.to_string())),
        }
    }
}

impl Connection for WsConnection {
    fn receive_one(&mut self) -> Result<Vec<u8>, FetchError> {
        loop {
            match self.socket.read() {
                Ok(Message::Text(text)) => return Ok(text.as_str().as_bytes().to_vec()),
                Ok(Message::Binary(data)) => return Ok(data.to_vec()),
                Ok(Message::Close(_)) => return Err(FetchError::Closed),
                // Control frames are answered by tungstenite; keep waiting.
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => continue,
                Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                    return Err(FetchError::Closed)
                }
                Err(tungstenite::Error::Io(e)) => {
                    return Err(FetchError::from_socket_io(e, self.timeout))
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn close(&mut self) {
        if let Err(e) = self.socket.close(None).and_then(|()| self.socket.flush()) {
            tracing::trace!(error = %e, "websocket close");
        }
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

/// Try each resolved address in turn; report the last failure.
fn connect_any(addrs: &[SocketAddr], host: &str, timeout: Duration) -> Result<TcpStream, FetchError> {
    let mut last_err = io::Error::new(io::ErrorKind::NotFound, "no addresses resolved");
    for addr in addrs {
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!(%addr, error = %e, "tcp connect failed");
                last_err = e;
            }
        }
    }
    if is_timeout(&last_err) {
        return Err(FetchError::Timeout(timeout));
    }
    Err(FetchError::Connect {
        address: host.to_string(),
        source: last_err,
    })
}
