//! TLS-terminating reverse proxy for local development.
//!
//! Each request is mapped to an upstream base URL (static, or filled from
//! regex captures of the `Host` header), forwarded over HTTP with method,
//! headers and body untouched, and relayed back with one access log line.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use http::ProxyServer;
pub use routing::TargetResolver;
