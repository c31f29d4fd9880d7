//! HTTP server setup and the proxy handler.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all proxy handler
//! - Serve it over TLS with the configured certificate
//! - Per request: resolve target, forward, relay, write one access log line
//!
//! # Request States
//! ```text
//! RECEIVED → RESOLVING ─┬→ RESOLVED → FORWARDING ─┬→ RELAYED        (upstream response)
//!                       │                         └→ UPSTREAM_ERROR  (502)
//!                       └→ RESOLUTION_FAILED                         (400)
//! ```

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use axum_server::Handle;
use chrono::Utc;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::forward::{upstream_url, Forwarder};
use crate::http::{request, response};
use crate::lifecycle::signals::shutdown_signal;
use crate::net::tls::{load_tls_config, TlsError};
use crate::observability::{AccessLog, AccessLogRecord, LogOutcome};
use crate::routing::TargetResolver;

/// Grace period for in-flight requests after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Error type for server startup and serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("cannot build upstream client: {0}")]
    Client(#[from] rustls::Error),

    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<TargetResolver>,
    pub forwarder: Forwarder,
    pub access_log: AccessLog,
}

/// HTTPS server for the proxy.
pub struct ProxyServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl ProxyServer {
    /// Create a new server from a validated configuration and its resolver.
    pub fn new(
        config: ProxyConfig,
        resolver: TargetResolver,
        access_log: AccessLog,
    ) -> Result<Self, ServerError> {
        let state = AppState {
            resolver: Arc::new(resolver),
            forwarder: Forwarder::new()?,
            access_log,
        };

        Ok(Self {
            router: build_router(state),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Bind the configured listen address.
    pub fn bind(&self) -> Result<TcpListener, ServerError> {
        let listener = TcpListener::bind(self.config.bind_address())?;
        Ok(listener)
    }

    /// Serve HTTPS on `listener` until a shutdown signal arrives.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServerError> {
        let tls = load_tls_config(&self.config.tls).await?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        let handle = Handle::new();
        let signal_handle = handle.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            signal_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        tracing::info!(
            address = %addr,
            target = %self.config.target_template,
            "HTTPS server starting"
        );

        axum_server::from_tcp_rustls(listener, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .fallback(proxy_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Main proxy handler.
/// Resolves the target, forwards the request, and logs the outcome.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let timestamp = Utc::now();
    let (parts, body) = request.into_parts();
    let mut record = AccessLogRecord {
        timestamp,
        method: parts.method.to_string(),
        path_and_query: request::path_and_query(&parts.uri),
        target: None,
        outcome: LogOutcome::Error(String::new()),
    };

    // 1. Resolve
    let host = request::request_host(&parts);
    let base = match state.resolver.resolve(host) {
        Ok(base) => base,
        Err(e) => {
            tracing::warn!(host = %host, error = %e, "Target resolution failed");
            record.outcome = LogOutcome::Error(e.to_string());
            state.access_log.record(&record);
            return response::routing_error();
        }
    };

    // 2. Compose upstream URL
    let url = match upstream_url(&base, &record.path_and_query) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(base = %base, error = %e, "Upstream URL composition failed");
            record.target = Some(base.to_string());
            record.outcome = LogOutcome::Error(e.to_string());
            state.access_log.record(&record);
            return response::upstream_error();
        }
    };
    record.target = Some(url.to_string());

    // 3. Forward
    match state.forwarder.forward(parts, body, &url).await {
        Ok(upstream) => {
            record.outcome = LogOutcome::Status {
                code: upstream.status().as_u16(),
                reason: response::status_text(&upstream),
            };
            state.access_log.record(&record);
            response::relay(upstream)
        }
        Err(e) => {
            tracing::error!(upstream = %url, error = %e, "Upstream error");
            record.outcome = LogOutcome::Error(e.to_string());
            state.access_log.record(&record);
            response::upstream_error()
        }
    }
}
