//! Minimal WebSocket server for integration tests.
//!
//! Accepts upgrades on a local port, records what each client presented, and
//! then behaves like the collaboration socket (push one count and close) or
//! like a broken peer.

use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tungstenite::Message;

#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Push this text message on connect, then close.
    Reply(&'static str),
    /// Complete the handshake and never send anything.
    Silent,
    /// Complete the handshake and close without a message.
    CloseWithoutMessage,
}

/// What a client sent with its upgrade request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub origin: Option<String>,
    pub user_agent: Option<String>,
}

pub struct WsServer {
    /// Endpoint template pointing at this server, e.g. `ws://127.0.0.1:PORT/problems/{key}`.
    pub template: String,
    connections: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl WsServer {
    /// TCP connections accepted so far.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(behavior: Behavior) -> WsServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let connections = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let connections = Arc::clone(&connections);
        let seen = Arc::clone(&seen);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                connections.fetch_add(1, Ordering::SeqCst);
                let seen = Arc::clone(&seen);
                thread::spawn(move || handle(stream, behavior, &seen));
            }
        });
    }
    WsServer {
        template: format!("ws://127.0.0.1:{}/problems/{{key}}", port),
        connections,
        seen,
    }
}

/// A port with nothing listening on it.
pub fn closed_port_template() -> String {
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").expect("bind");
        l.local_addr().unwrap().port()
    };
    format!("ws://127.0.0.1:{}/problems/{{key}}", port)
}

fn header(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn handle(stream: TcpStream, behavior: Behavior, seen: &Mutex<Vec<SeenRequest>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut recorded = None;
    let callback = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
        recorded = Some(SeenRequest {
            path: req.uri().path().to_string(),
            origin: header(req, "origin"),
            user_agent: header(req, "user-agent"),
        });
        Ok(resp)
    };
    let mut ws = match tungstenite::accept_hdr(stream, callback) {
        Ok(ws) => ws,
        Err(_) => return,
    };
    if let Some(r) = recorded {
        seen.lock().unwrap().push(r);
    }

    match behavior {
        Behavior::Reply(body) => {
            let _ = ws.send(Message::text(body.to_string()));
            let _ = ws.close(None);
        }
        Behavior::Silent => {
            thread::sleep(Duration::from_secs(2));
            return;
        }
        Behavior::CloseWithoutMessage => {
            let _ = ws.close(None);
        }
    }
    // Drain until the client's close reply (or timeout) so the close handshake completes.
    while ws.read().is_ok() {}
}
