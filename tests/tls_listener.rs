//! Full HTTPS listener: TLS termination with HTTP/1.1 and HTTP/2 clients.

use axum::http::{StatusCode, Uri};
use axum::Router;
use local_https_proxy::config::{ProxyConfig, TlsConfig};
use local_https_proxy::observability::AccessLog;
use local_https_proxy::{ProxyServer, TargetResolver};
use rcgen::{CertificateParams, KeyPair};
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::NamedTempFile;

mod common;

/// Self-signed PEM certificate and key for `localhost` / `127.0.0.1`.
fn self_signed_pem() -> (NamedTempFile, NamedTempFile) {
    let params = CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])
        .unwrap();
    let key_pair = KeyPair::generate().unwrap();
    let cert = params.self_signed(&key_pair).unwrap();

    let mut cert_file = NamedTempFile::new().unwrap();
    cert_file.write_all(cert.pem().as_bytes()).unwrap();
    let mut key_file = NamedTempFile::new().unwrap();
    key_file.write_all(key_pair.serialize_pem().as_bytes()).unwrap();
    (cert_file, key_file)
}

/// Serve the full `ProxyServer` over TLS on an ephemeral port.
async fn start_https_proxy(
    target: &str,
    cert: &NamedTempFile,
    key: &NamedTempFile,
) -> (SocketAddr, Arc<common::RecordingSink>) {
    let config = ProxyConfig {
        listen_port: 0,
        target_template: target.to_string(),
        host_pattern: None,
        tls: TlsConfig {
            cert_path: cert.path().to_path_buf(),
            key_path: key.path().to_path_buf(),
        },
    };
    let resolver = TargetResolver::new(target, None).unwrap();
    let sink = Arc::new(common::RecordingSink::default());
    let server = ProxyServer::new(config, resolver, AccessLog::new(sink.clone())).unwrap();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });
    (addr, sink)
}

fn https_client(builder: reqwest::ClientBuilder) -> reqwest::Client {
    builder
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

async fn echo_backend() -> SocketAddr {
    common::start_backend(Router::new().fallback(|uri: Uri| async move { uri.to_string() })).await
}

#[tokio::test]
async fn test_https_http1_relayed_and_logged() {
    let (cert, key) = self_signed_pem();
    let backend = echo_backend().await;
    let (proxy, log) = start_https_proxy(&format!("http://{}", backend), &cert, &key).await;

    let client = https_client(reqwest::Client::builder().http1_only());
    let res = client
        .get(format!("https://127.0.0.1:{}/p?q=1", proxy.port()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.version(), reqwest::Version::HTTP_11);
    assert_eq!(res.text().await.unwrap(), "/p?q=1");

    let lines = log.lines();
    assert_eq!(lines.len(), 1);
    assert!(
        lines[0].ends_with(&format!("GET /p?q=1 -> http://{}/p?q=1: 200 OK", backend)),
        "line: {}",
        lines[0]
    );
}

#[tokio::test]
async fn test_https_http2_relayed_and_logged() {
    let (cert, key) = self_signed_pem();
    let backend = echo_backend().await;
    let (proxy, log) = start_https_proxy(&format!("http://{}", backend), &cert, &key).await;

    let client = https_client(reqwest::Client::builder().http2_prior_knowledge());
    let res = client
        .get(format!("https://127.0.0.1:{}/p?q=1", proxy.port()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.version(), reqwest::Version::HTTP_2);
    assert_eq!(res.text().await.unwrap(), "/p?q=1");

    let lines = log.lines();
    assert_eq!(lines.len(), 1);
    assert!(
        lines[0].ends_with(&format!("GET /p?q=1 -> http://{}/p?q=1: 200 OK", backend)),
        "line: {}",
        lines[0]
    );
}

#[tokio::test]
async fn test_https_rejects_plain_http() {
    let (cert, key) = self_signed_pem();
    let backend = echo_backend().await;
    let (proxy, log) = start_https_proxy(&format!("http://{}", backend), &cert, &key).await;

    let result = common::client()
        .get(format!("http://127.0.0.1:{}/p", proxy.port()))
        .send()
        .await;

    assert!(result.is_err());
    assert!(log.lines().is_empty());
}
