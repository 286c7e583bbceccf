//! HTTPS transport to DoH upstreams (RFC 8484).
//!
//! All upstreams share one connection-pooled client. Redirects are followed
//! and response bodies are relayed without decoding.

use super::transport::{DohTransport, OutboundRequest, TransportError, TransportResponse};
use async_trait::async_trait;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .pool_max_idle_per_host(8)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

pub struct HttpsTransport {
    timeout: Duration,
}

impl HttpsTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl DohTransport for HttpsTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let url = request.url.to_string();
        debug!(
            url = %url,
            method = %request.method,
            body_len = request.body.as_ref().map_or(0, |b| b.len()),
            "Sending DoH request"
        );

        let mut builder = SHARED_CLIENT
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let timeout_ms = self.timeout.as_millis() as u64;

        let response = tokio::time::timeout(self.timeout, builder.send())
            .await
            .map_err(|_| TransportError::Timeout(timeout_ms))?
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();

        let body = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| TransportError::Timeout(timeout_ms))?
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(
            url = %url,
            status = status.as_u16(),
            response_len = body.len(),
            "DoH response received"
        );

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }

    fn protocol_name(&self) -> &'static str {
        "HTTPS"
    }
}
