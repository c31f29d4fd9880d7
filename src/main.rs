//! local-https-proxy
//!
//! ```text
//!     Client (HTTPS)
//!         │
//!         ▼
//!   ┌───────────┐    ┌───────────┐    ┌───────────┐
//!   │    net    │───▶│   http    │───▶│  routing  │
//!   │    tls    │    │  handler  │    │ resolver  │
//!   └───────────┘    └─────┬─────┘    └───────────┘
//!                          │
//!                          ▼
//!                    ┌───────────┐
//!                    │  forward  │────────▶ Upstream (HTTP)
//!                    └───────────┘
//!
//!   access log (stdout) on every path, diagnostics (stderr) via tracing
//! ```

use clap::Parser;

use local_https_proxy::config::{load_config, Cli};
use local_https_proxy::observability::{logging, AccessLog};
use local_https_proxy::ProxyServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();
    let loaded = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let server = ProxyServer::new(loaded.proxy, loaded.resolver, AccessLog::stdout())?;
    let config = server.config();
    tracing::info!(
        listen_port = config.listen_port,
        target = %config.target_template,
        host_pattern = ?config.host_pattern,
        cert_path = %config.tls.cert_path.display(),
        key_path = %config.tls.key_path.display(),
        "Configuration loaded"
    );

    let listener = server.bind()?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
