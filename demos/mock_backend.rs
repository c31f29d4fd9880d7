//! Plain-HTTP upstream for trying the proxy by hand.
//!
//! ```text
//! cargo run --example mock_backend
//! local-https-proxy --port 8443 --target http://localhost:8080
//! curl -k https://localhost:8443/echo -d 'hello'
//! ```

use axum::{
    body::{Body, Bytes},
    http::HeaderMap,
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = Router::new()
        .route("/", get(|| async { "Hello from the mock upstream" }))
        .route("/echo", any(|headers: HeaderMap, body: Bytes| async move {
            let host = headers
                .get("host")
                .and_then(|h| h.to_str().ok())
                .unwrap_or("-")
                .to_string();
            ([("x-seen-host", host)], body)
        }))
        .route("/slow", get(|| async {
            let ticks = futures_util::stream::unfold(0u32, |n| async move {
                if n == 5 {
                    return None;
                }
                tokio::time::sleep(Duration::from_millis(500)).await;
                Some((Ok::<_, std::io::Error>(Bytes::from(format!("tick {}\n", n))), n + 1))
            });
            Body::from_stream(ticks)
        }));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    println!("Mock upstream listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
