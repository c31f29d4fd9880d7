//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → axum-server accept loop
//!     → tls.rs material (one certificate for every connection)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - No per-host certificate selection
//! - No client certificate verification

pub mod tls;
