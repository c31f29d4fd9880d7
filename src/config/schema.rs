//! Configuration schema definitions.
//!
//! `FileConfig` is the optional on-disk layer; every field is optional so a
//! file may set as little as it wants. `ProxyConfig` is the resolved,
//! validated result shared read-only with the request pipeline.

use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_TARGET: &str = "http://localhost:8080";
pub const DEFAULT_CERT_PATH: &str = "./server.crt";
pub const DEFAULT_KEY_PATH: &str = "./server.key";

/// Root configuration for the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Port the HTTPS listener binds on `0.0.0.0`.
    pub listen_port: u16,

    /// Upstream base URL, possibly containing `{name}` / `{N}` placeholders.
    pub target_template: String,

    /// Regex matched against the inbound host. Only consulted when the
    /// template has placeholders.
    pub host_pattern: Option<String>,

    /// Certificate and private key for the listener.
    pub tls: TlsConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_PORT,
            target_template: DEFAULT_TARGET.to_string(),
            host_pattern: None,
            tls: TlsConfig::default(),
        }
    }
}

impl ProxyConfig {
    /// Socket address string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.listen_port)
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: PathBuf::from(DEFAULT_CERT_PATH),
            key_path: PathBuf::from(DEFAULT_KEY_PATH),
        }
    }
}

/// Settings read from a TOML config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Listen port. Kept wide so out-of-range values reach validation.
    pub port: Option<u32>,
    pub target: Option<String>,
    pub host_pattern: Option<String>,
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
}
