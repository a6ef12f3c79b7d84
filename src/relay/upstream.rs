//! Outbound forwarding to the intake API.
//!
//! # Responsibilities
//! - Build the target URL (`<base>/init` or `<base><incoming path>`)
//! - Issue the outbound POST, buffered or streaming
//! - Relay the upstream status and body back verbatim
//!
//! # Design Decisions
//! - One shared reqwest client, built without a global timeout: the init
//!   route forwards with no explicit bound, only the generic routes apply
//!   the configured per-request timeout
//! - Streaming forwards never buffer the inbound body; Content-Length is
//!   propagated when the caller supplied a positive one, otherwise the
//!   outbound request is chunked

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_LENGTH;
use axum::http::HeaderMap;
use axum::response::Response;

use crate::config::schema::UpstreamConfig;

/// Client for the fixed upstream intake API.
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    forward_timeout: Duration,
}

impl UpstreamClient {
    /// Create a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            forward_timeout: Duration::from_secs(config.forward_timeout_secs),
        }
    }

    /// Target URL for an intake path.
    pub fn target(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Forward a fully buffered body. No explicit timeout.
    pub async fn forward_buffered(
        &self,
        path: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.http
            .post(self.target(path))
            .headers(headers)
            .body(body)
            .send()
            .await
    }

    /// Forward the inbound body as a stream, bounded by the configured
    /// timeout for the whole outbound call.
    pub async fn forward_streaming(
        &self,
        path: &str,
        headers: HeaderMap,
        content_length: Option<u64>,
        body: Body,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self
            .http
            .post(self.target(path))
            .headers(headers)
            .body(reqwest::Body::wrap_stream(body.into_data_stream()))
            .timeout(self.forward_timeout);

        if let Some(len) = content_length {
            request = request.header(CONTENT_LENGTH, len);
        }

        request.send().await
    }
}

/// Copy the upstream status code and stream the upstream body back to the
/// caller unmodified.
pub fn relay_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> UpstreamClient {
        UpstreamClient::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            forward_timeout_secs: 10,
        })
    }

    #[test]
    fn target_appends_path_to_base() {
        let upstream = client("https://api.pogr.io/v1/intake");
        assert_eq!(upstream.target("/init"), "https://api.pogr.io/v1/intake/init");
        assert_eq!(
            upstream.target("/metrics"),
            "https://api.pogr.io/v1/intake/metrics"
        );
    }

    #[test]
    fn target_tolerates_trailing_slash_in_base() {
        let upstream = client("http://127.0.0.1:9000/v1/intake/");
        assert_eq!(upstream.target("/data"), "http://127.0.0.1:9000/v1/intake/data");
    }
}
