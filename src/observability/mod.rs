//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request pipeline produces:
//!     → access_log.rs (one formatted line per request, stdout)
//!     → logging.rs (structured tracing events, stderr)
//! ```
//!
//! # Design Decisions
//! - Access log lines are plain text in a fixed format for grepping
//! - Diagnostic events carry structured fields
//! - The access log sink is a trait so callers can redirect it

pub mod access_log;
pub mod logging;

pub use access_log::{AccessLog, AccessLogRecord, AccessLogSink, LogOutcome, StdoutSink};
