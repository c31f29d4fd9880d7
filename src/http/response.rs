//! Client-facing responses.
//!
//! # Responsibilities
//! - Relay the upstream response (status, reason, headers, streamed body)
//! - Produce the fixed responses for routing and upstream failures
//!
//! # Design Decisions
//! - Routing failures are 400, upstream failures are 502, so the two are
//!   distinguishable from the status code alone
//! - Upstream headers are not filtered or rewritten

use axum::{
    body::Body,
    http::{Response as HttpResponse, StatusCode},
    response::{IntoResponse, Response},
};
use hyper::{body::Incoming, ext::ReasonPhrase};

pub const ROUTING_ERROR_BODY: &str = "Proxy Routing Error";
pub const UPSTREAM_ERROR_BODY: &str = "Proxy Error";

/// Target could not be resolved for the request's host.
pub fn routing_error() -> Response {
    (StatusCode::BAD_REQUEST, ROUTING_ERROR_BODY).into_response()
}

/// Upstream could not be reached or failed mid-exchange.
pub fn upstream_error() -> Response {
    (StatusCode::BAD_GATEWAY, UPSTREAM_ERROR_BODY).into_response()
}

/// Reason phrase as received, or the canonical one for the status.
pub fn status_text<B>(response: &HttpResponse<B>) -> String {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .or_else(|| response.status().canonical_reason())
        .unwrap_or_default()
        .to_string()
}

/// Pass the upstream response through to the client without buffering.
pub fn relay(upstream: HttpResponse<Incoming>) -> Response {
    let (parts, body) = upstream.into_parts();
    Response::from_parts(parts, Body::new(body))
}
