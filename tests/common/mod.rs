//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    Router,
};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

use intake_relay::config::RelayConfig;
use intake_relay::http::HttpServer;
use intake_relay::lifecycle::Shutdown;

/// One request observed by the mock upstream.
#[derive(Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

pub type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

#[derive(Clone)]
struct MockState {
    captured: Captured,
    status: u16,
    body: &'static [u8],
}

async fn capture_handler(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static [u8]) {
    state.captured.lock().unwrap().push(CapturedRequest {
        method,
        path: uri.path().to_string(),
        headers,
        body: body.to_vec(),
    });
    (StatusCode::from_u16(state.status).unwrap(), state.body)
}

/// Start a mock upstream that records every request and answers with a fixed
/// status and body.
pub async fn start_mock_upstream(status: u16, body: &'static [u8]) -> (SocketAddr, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        captured: captured.clone(),
        status,
        body,
    };
    let app = Router::new().fallback(capture_handler).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, captured)
}

/// Start an upstream that accepts connections but never answers, to exercise
/// the forward timeout.
pub async fn start_stalling_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        // Drain the request but never write a response.
                        let mut buf = [0u8; 1024];
                        while let Ok(n) = socket.read(&mut buf).await {
                            if n == 0 {
                                break;
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Reserve an address nothing is listening on.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Start the relay against the given upstream base URL.
///
/// The returned `Shutdown` must be kept alive for the duration of the test;
/// dropping it stops the server.
pub async fn start_relay(upstream_base: String, forward_timeout_secs: u64) -> (SocketAddr, Shutdown) {
    let mut config = RelayConfig::default();
    config.upstream.base_url = upstream_base;
    config.upstream.forward_timeout_secs = forward_timeout_secs;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the server a moment to start accepting.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}
