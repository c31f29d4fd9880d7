//! TLS configuration and certificate loading.

use axum_server::tls_rustls::RustlsConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::TlsConfig;

/// Error type for loading listener TLS material.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("{what} file not found: {}", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error("invalid TLS material ({} / {}): {source}", .cert.display(), .key.display())]
    Invalid {
        cert: PathBuf,
        key: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn require_file(what: &'static str, path: &Path) -> Result<(), TlsError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(TlsError::NotFound {
            what,
            path: path.to_path_buf(),
        })
    }
}

/// Load the listener certificate and private key (PEM).
pub async fn load_tls_config(config: &TlsConfig) -> Result<RustlsConfig, TlsError> {
    require_file("certificate", &config.cert_path)?;
    require_file("private key", &config.key_path)?;

    // Already installed is fine; the first provider wins.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    RustlsConfig::from_pem_file(&config.cert_path, &config.key_path)
        .await
        .map_err(|source| TlsError::Invalid {
            cert: config.cert_path.clone(),
            key: config.key_path.clone(),
            source,
        })
}
