//! Request inspection.
//!
//! # Responsibilities
//! - Extract routing-relevant information (host, path)
//!
//! # Design Decisions
//! - Host is taken verbatim from the `Host` header, falling back to the
//!   URI authority (HTTP/2 `:authority`), then to the empty string
//! - A `Host` header whose bytes are not UTF-8 counts as an empty host; the
//!   authority is not consulted
//! - An empty query (`/path?`) is dropped, a non-empty one keeps its `?`

use axum::http::{header::HOST, request::Parts, Uri};

/// Host value used for target resolution.
pub fn request_host(parts: &Parts) -> &str {
    match parts.headers.get(HOST) {
        Some(value) => std::str::from_utf8(value.as_bytes()).unwrap_or(""),
        None => parts.uri.authority().map_or("", |a| a.as_str()),
    }
}

/// Original path plus `?query` as sent by the client.
pub fn path_and_query(uri: &Uri) -> String {
    match uri.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", uri.path(), query),
        _ => uri.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn parts(req: Request<()>) -> Parts {
        req.into_parts().0
    }

    #[test]
    fn test_host_header_verbatim() {
        let p = parts(
            Request::builder()
                .uri("/")
                .header("Host", "API.example.com:8443")
                .body(())
                .unwrap(),
        );
        assert_eq!(request_host(&p), "API.example.com:8443");
    }

    #[test]
    fn test_host_falls_back_to_authority() {
        let p = parts(
            Request::builder()
                .uri("https://api.example.com/x")
                .body(())
                .unwrap(),
        );
        assert_eq!(request_host(&p), "api.example.com");
    }

    #[test]
    fn test_utf8_host_header_kept() {
        let mut p = parts(Request::builder().uri("/").body(()).unwrap());
        p.headers.insert(
            HOST,
            HeaderValue::from_bytes(b"caf\xc3\xa9.example.com").unwrap(),
        );
        assert_eq!(request_host(&p), "café.example.com");
    }

    #[test]
    fn test_non_utf8_host_header_is_empty() {
        let mut p = parts(
            Request::builder()
                .uri("https://api.example.com/x")
                .body(())
                .unwrap(),
        );
        p.headers
            .insert(HOST, HeaderValue::from_bytes(b"\xff.example.com").unwrap());
        assert_eq!(request_host(&p), "");
    }

    #[test]
    fn test_missing_host_is_empty() {
        let p = parts(Request::builder().uri("/x").body(()).unwrap());
        assert_eq!(request_host(&p), "");
    }

    #[test]
    fn test_path_and_query() {
        assert_eq!(path_and_query(&"/foo?x=1".parse().unwrap()), "/foo?x=1");
        assert_eq!(path_and_query(&"/foo?".parse().unwrap()), "/foo");
        assert_eq!(path_and_query(&"/foo".parse().unwrap()), "/foo");
        assert_eq!(path_and_query(&"http://h".parse().unwrap()), "/");
    }
}
