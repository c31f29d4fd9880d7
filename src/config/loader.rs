//! Configuration loading.
//!
//! Layers, highest precedence first: command-line flag, environment
//! variable, TOML file, built-in default. clap folds the first two together
//! through its `env` support.

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::{FileConfig, ProxyConfig, TlsConfig, DEFAULT_PORT};
use crate::config::validation::{validate_config, validate_port, ValidationError};
use crate::routing::TargetResolver;

/// Command-line and environment surface.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "local-https-proxy", version)]
#[command(about = "TLS-terminating reverse proxy for local development", long_about = None)]
pub struct Cli {
    /// HTTPS listening port
    #[arg(short, long, env = "LOCAL_HTTPS_PROXY_PORT")]
    pub port: Option<u32>,

    /// Upstream URL, optionally with {name} or {N} placeholders
    #[arg(short, long, env = "LOCAL_HTTPS_PROXY_TARGET")]
    pub target: Option<String>,

    /// Regex matched against the Host header to fill target placeholders
    #[arg(long, env = "LOCAL_HTTPS_PROXY_HOST_PATTERN")]
    pub host_pattern: Option<String>,

    /// Certificate file (PEM)
    #[arg(long, env = "LOCAL_HTTPS_PROXY_CERT_PATH")]
    pub cert: Option<PathBuf>,

    /// Private key file (PEM)
    #[arg(long, env = "LOCAL_HTTPS_PROXY_KEY_PATH")]
    pub key: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(short, long, env = "LOCAL_HTTPS_PROXY_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validated configuration plus the resolver compiled from it.
#[derive(Debug)]
pub struct LoadedConfig {
    pub proxy: ProxyConfig,
    pub resolver: TargetResolver,
}

/// Read a TOML config file.
pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Resolve the effective configuration from all layers and validate it.
pub fn load_config(cli: &Cli) -> Result<LoadedConfig, ConfigError> {
    let file = match &cli.config {
        Some(path) => load_file(path)?,
        None => FileConfig::default(),
    };
    resolve(layer(cli, file))
}

/// Overlay flag/env values on top of file values.
pub fn layer(cli: &Cli, file: FileConfig) -> FileConfig {
    FileConfig {
        port: cli.port.or(file.port),
        target: cli.target.clone().or(file.target),
        host_pattern: cli.host_pattern.clone().or(file.host_pattern),
        cert_path: cli.cert.clone().or(file.cert_path),
        key_path: cli.key.clone().or(file.key_path),
    }
}

/// Fill defaults into layered settings and validate the result.
pub fn resolve(settings: FileConfig) -> Result<LoadedConfig, ConfigError> {
    let defaults = ProxyConfig::default();
    let mut errors = Vec::new();

    let listen_port = match validate_port(settings.port.unwrap_or(u32::from(DEFAULT_PORT))) {
        Ok(port) => port,
        Err(e) => {
            errors.push(e);
            DEFAULT_PORT
        }
    };

    let config = ProxyConfig {
        listen_port,
        target_template: settings.target.unwrap_or(defaults.target_template),
        host_pattern: settings.host_pattern.filter(|p| !p.is_empty()),
        tls: TlsConfig {
            cert_path: settings.cert_path.unwrap_or(defaults.tls.cert_path),
            key_path: settings.key_path.unwrap_or(defaults.tls.key_path),
        },
    };

    match validate_config(&config) {
        Ok(resolver) if errors.is_empty() => Ok(LoadedConfig {
            proxy: config,
            resolver,
        }),
        Ok(_) => Err(ConfigError::Validation(errors)),
        Err(mut more) => {
            errors.append(&mut more);
            Err(ConfigError::Validation(errors))
        }
    }
}
