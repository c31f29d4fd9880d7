//! Upstream request forwarding.
//!
//! # Responsibilities
//! - Compose the upstream URL from the resolved base and the inbound path
//! - Re-target the inbound request and send it upstream
//! - Report transport failures with their full cause chain
//!
//! # Design Decisions
//! - Method, headers and body are forwarded verbatim; no header rewriting
//! - Bodies stream in both directions, nothing is buffered
//! - No retries and no timeouts; a hung upstream hangs the request

use axum::body::Body;
use axum::http::{request::Parts, uri::InvalidUri, Extensions, Request, Response, Uri, Version};
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use url::Url;

/// Upstream client; speaks plain HTTP or HTTPS depending on the URL scheme.
pub type UpstreamClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Outcome of one upstream exchange.
pub type UpstreamOutcome = Result<Response<Incoming>, ForwardError>;

/// Why a request could not be relayed.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("cannot join {path:?} onto {base}: {source}")]
    Join {
        base: String,
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid upstream URI: {0}")]
    Uri(#[from] InvalidUri),

    #[error("{}", describe(.0))]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

/// Render an error followed by each of its sources.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Resolve the inbound path and query against the upstream base.
pub fn upstream_url(base: &Url, path_and_query: &str) -> Result<Url, ForwardError> {
    base.join(path_and_query).map_err(|source| ForwardError::Join {
        base: base.to_string(),
        path: path_and_query.to_string(),
        source,
    })
}

/// Sends re-targeted requests upstream.
#[derive(Clone)]
pub struct Forwarder {
    client: UpstreamClient,
}

impl Forwarder {
    pub fn new() -> Result<Self, rustls::Error> {
        let connector = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::aws_lc_rs::default_provider())?
            .https_or_http()
            .enable_http1()
            .build();

        Ok(Self::with_client(
            Client::builder(TokioExecutor::new()).build(connector),
        ))
    }

    pub fn with_client(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Send the inbound request to `url` and return the upstream response
    /// with its body still unread.
    pub async fn forward(&self, mut parts: Parts, body: Body, url: &Url) -> UpstreamOutcome {
        let uri: Uri = url.as_str().parse()?;

        tracing::debug!(method = %parts.method, upstream = %uri, "Forwarding request");

        parts.uri = uri;
        parts.version = Version::HTTP_11;
        parts.extensions = Extensions::new();

        let response = self.client.request(Request::from_parts(parts, body)).await?;
        Ok(response)
    }
}
