//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TLS connection
//!     → server.rs (Axum setup, proxy handler)
//!     → request.rs (host, path and query)
//!     → [routing layer resolves upstream base URL]
//!     → forward.rs (compose URL, send upstream)
//!     → response.rs (relay or fixed error response)
//!     → Send to client
//! ```

pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use forward::{ForwardError, Forwarder, UpstreamOutcome};
pub use server::{build_router, AppState, ProxyServer, ServerError};
