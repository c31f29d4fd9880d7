//! Shared utilities for integration testing.

use axum::Router;
use local_https_proxy::http::{build_router, AppState, Forwarder};
use local_https_proxy::observability::{AccessLog, AccessLogSink};
use local_https_proxy::TargetResolver;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Access log sink that keeps every line in memory.
#[derive(Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl AccessLogSink for RecordingSink {
    fn write_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// Serve `app` on an ephemeral local port.
pub async fn start_backend(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Proxy router wired to a recording access log.
#[allow(dead_code)]
pub fn proxy_router(target: &str, host_pattern: Option<&str>) -> (Router, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let state = AppState {
        resolver: Arc::new(TargetResolver::new(target, host_pattern).unwrap()),
        forwarder: Forwarder::new().unwrap(),
        access_log: AccessLog::new(sink.clone()),
    };
    (build_router(state), sink)
}

/// Run the proxy over plain TCP; TLS termination is not under test here.
#[allow(dead_code)]
pub async fn start_proxy(target: &str, host_pattern: Option<&str>) -> (SocketAddr, Arc<RecordingSink>) {
    let (router, sink) = proxy_router(target, host_pattern);
    (start_backend(router).await, sink)
}

/// A local port with nothing listening on it.
#[allow(dead_code)]
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
