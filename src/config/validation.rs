//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap and serde handle syntactic)
//! - Validate value ranges (port 1-65535)
//! - Check that TLS material exists on disk
//! - Check that the target template and host pattern agree
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<TargetResolver, Vec<ValidationError>>
//! - The resolver built here is the one the server runs with, so the host
//!   pattern is compiled exactly once
//! - Runs before config is accepted into the system

use std::path::PathBuf;
use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::routing::TargetResolver;

/// A single semantic problem with the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("port {0} is out of range (1-65535)")]
    PortOutOfRange(u32),

    #[error("{what} file not found: {}", .path.display())]
    MissingFile { what: &'static str, path: PathBuf },

    #[error("target {target:?} is not a valid URL: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("target {0:?} contains placeholders but no host pattern is configured")]
    MissingHostPattern(String),

    #[error("host pattern is not a valid regex: {0}")]
    InvalidHostPattern(#[from] regex::Error),
}

/// Narrow a layered port value into the listener's range.
pub fn validate_port(port: u32) -> Result<u16, ValidationError> {
    match u16::try_from(port) {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(ValidationError::PortOutOfRange(port)),
    }
}

/// Validate a fully layered configuration and compile its resolver.
pub fn validate_config(config: &ProxyConfig) -> Result<TargetResolver, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.tls.cert_path.is_file() {
        errors.push(ValidationError::MissingFile {
            what: "certificate",
            path: config.tls.cert_path.clone(),
        });
    }
    if !config.tls.key_path.is_file() {
        errors.push(ValidationError::MissingFile {
            what: "private key",
            path: config.tls.key_path.clone(),
        });
    }

    match TargetResolver::from_config(config) {
        Ok(resolver) if errors.is_empty() => Ok(resolver),
        Ok(_) => Err(errors),
        Err(e) => {
            errors.push(e);
            Err(errors)
        }
    }
}
