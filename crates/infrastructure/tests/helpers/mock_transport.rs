#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_infrastructure::upstream::{
    DohTransport, OutboundRequest, TransportError, TransportResponse,
};
use http::{HeaderMap, HeaderValue, StatusCode};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Scripted {
    Answer {
        status: StatusCode,
        body: &'static [u8],
        delay: Duration,
    },
    Fail {
        error: TransportError,
        delay: Duration,
    },
}

impl Scripted {
    pub fn ok(body: &'static [u8], delay_ms: u64) -> Self {
        Scripted::Answer {
            status: StatusCode::OK,
            body,
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub fn status(status: StatusCode, delay_ms: u64) -> Self {
        Scripted::Answer {
            status,
            body: b"error",
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub fn fail(reason: &str, delay_ms: u64) -> Self {
        Scripted::Fail {
            error: TransportError::Request(reason.to_string()),
            delay: Duration::from_millis(delay_ms),
        }
    }
}

/// Transport that answers each upstream host from a script.
pub struct MockTransport {
    scripts: HashMap<String, Scripted>,
    sent: Mutex<Vec<OutboundRequest>>,
    completed: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            sent: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, host: &str, script: Scripted) -> Self {
        self.scripts.insert(host.to_string(), script);
        self
    }

    pub fn sent(&self) -> Vec<OutboundRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of sends that ran to the end without being aborted.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DohTransport for MockTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let host = request.url.host_str().unwrap_or_default().to_string();
        self.sent.lock().unwrap().push(request);

        let script = self
            .scripts
            .get(&host)
            .cloned()
            .unwrap_or_else(|| Scripted::fail("no script", 0));

        let result = match script {
            Scripted::Answer { status, body, delay } => {
                tokio::time::sleep(delay).await;
                let mut headers = HeaderMap::new();
                headers.insert("content-type", HeaderValue::from_static("application/dns-message"));
                Ok(TransportResponse {
                    status,
                    headers,
                    body: Bytes::from_static(body),
                })
            }
            Scripted::Fail { error, delay } => {
                tokio::time::sleep(delay).await;
                Err(error)
            }
        };

        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }
}
