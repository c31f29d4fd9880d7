//! Per-request access log.
//!
//! One line per inbound request, whatever the outcome:
//!
//! ```text
//! [2024-05-01T12:00:00.000Z] GET /foo?x=1 -> http://localhost:8080/foo?x=1: 200 OK
//! [2024-05-01T12:00:00.000Z] GET /foo -> : ERROR: host did not match pattern
//! ```
//!
//! The record decides what is written; an [`AccessLogSink`] decides where.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Result column of an access log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutcome {
    /// Upstream answered.
    Status { code: u16, reason: String },
    /// Resolution or forwarding failed.
    Error(String),
}

impl fmt::Display for LogOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogOutcome::Status { code, reason } => write!(f, "{} {}", code, reason),
            LogOutcome::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

/// Everything logged about one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogRecord {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path_and_query: String,
    /// Composed upstream URL; `None` when resolution failed.
    pub target: Option<String>,
    pub outcome: LogOutcome,
}

impl fmt::Display for AccessLogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} -> {}: {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.method,
            self.path_and_query,
            self.target.as_deref().unwrap_or(""),
            self.outcome
        )
    }
}

/// Destination for formatted access log lines.
pub trait AccessLogSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Writes each line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl AccessLogSink for StdoutSink {
    fn write_line(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", line) {
            tracing::warn!(error = %e, "Failed to write access log line");
        }
    }
}

/// Shared handle to the configured sink.
#[derive(Clone)]
pub struct AccessLog {
    sink: Arc<dyn AccessLogSink>,
}

impl AccessLog {
    pub fn new(sink: Arc<dyn AccessLogSink>) -> Self {
        Self { sink }
    }

    pub fn stdout() -> Self {
        Self::new(Arc::new(StdoutSink))
    }

    pub fn record(&self, record: &AccessLogRecord) {
        self.sink.write_line(&record.to_string());
    }
}

impl Default for AccessLog {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for AccessLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessLog").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl AccessLogSink for Lines {
        fn write_line(&self, line: &str) {
            self.0.lock().unwrap().push(line.to_string());
        }
    }

    fn record(target: Option<&str>, outcome: LogOutcome) -> AccessLogRecord {
        AccessLogRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            method: "GET".into(),
            path_and_query: "/foo?x=1".into(),
            target: target.map(String::from),
            outcome,
        }
    }

    #[test]
    fn test_success_line() {
        let r = record(
            Some("http://localhost:8080/foo?x=1"),
            LogOutcome::Status {
                code: 200,
                reason: "OK".into(),
            },
        );
        assert_eq!(
            r.to_string(),
            "[2024-05-01T12:00:00.000Z] GET /foo?x=1 -> http://localhost:8080/foo?x=1: 200 OK"
        );
    }

    #[test]
    fn test_upstream_error_line() {
        let r = record(
            Some("http://localhost:1/foo?x=1"),
            LogOutcome::Error("connection refused".into()),
        );
        assert_eq!(
            r.to_string(),
            "[2024-05-01T12:00:00.000Z] GET /foo?x=1 -> http://localhost:1/foo?x=1: ERROR: connection refused"
        );
    }

    #[test]
    fn test_resolution_error_has_no_target() {
        let r = record(None, LogOutcome::Error("host did not match pattern".into()));
        assert_eq!(
            r.to_string(),
            "[2024-05-01T12:00:00.000Z] GET /foo?x=1 -> : ERROR: host did not match pattern"
        );
    }

    #[test]
    fn test_record_goes_to_sink() {
        let lines = Arc::new(Lines::default());
        let log = AccessLog::new(lines.clone());
        log.record(&record(None, LogOutcome::Error("x".into())));
        log.record(&record(None, LogOutcome::Error("y".into())));

        let written = lines.0.lock().unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[1].ends_with("ERROR: y"));
    }
}
