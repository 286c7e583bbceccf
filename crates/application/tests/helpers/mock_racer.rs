#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_application::ports::UpstreamRacer;
use doh_relay_domain::{
    DomainError, UpstreamAnswer, UpstreamFailure, UpstreamGroup, UpstreamGroupKind, UpstreamQuery,
};
use http::{HeaderMap, HeaderValue, StatusCode};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedRace {
    pub group: UpstreamGroupKind,
    pub urls: Vec<String>,
    pub query: UpstreamQuery,
}

/// Racer that answers from a script and records every call.
pub struct MockUpstreamRacer {
    calls: Mutex<Vec<RecordedRace>>,
    failure: Mutex<Option<DomainError>>,
    status: Mutex<StatusCode>,
    headers: Mutex<HeaderMap>,
    body: Mutex<Bytes>,
}

impl MockUpstreamRacer {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/dns-message"));
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            status: Mutex::new(StatusCode::OK),
            headers: Mutex::new(headers),
            body: Mutex::new(Bytes::from(vec![0x12; 100])),
        }
    }

    pub fn set_body(&self, body: impl Into<Bytes>) {
        *self.body.lock().unwrap() = body.into();
    }

    pub fn set_status(&self, status: StatusCode) {
        *self.status.lock().unwrap() = status;
    }

    pub fn insert_header(&self, name: &'static str, value: &'static str) {
        self.headers
            .lock()
            .unwrap()
            .insert(name, HeaderValue::from_static(value));
    }

    pub fn fail_all(&self) {
        *self.failure.lock().unwrap() = Some(DomainError::AllUpstreamsFailed(vec![
            UpstreamFailure::new("https://a.example/dns-query", "HTTP 500"),
            UpstreamFailure::new("https://b.example/dns-query", "connection refused"),
        ]));
    }

    pub fn fail_with(&self, error: DomainError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<RecordedRace> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedRace {
        self.calls().pop().expect("racer was not called")
    }
}

impl Default for MockUpstreamRacer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamRacer for MockUpstreamRacer {
    async fn race(
        &self,
        group: &UpstreamGroup,
        query: &UpstreamQuery,
    ) -> Result<UpstreamAnswer, DomainError> {
        self.calls.lock().unwrap().push(RecordedRace {
            group: group.kind,
            urls: group.urls.to_vec(),
            query: query.clone(),
        });

        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }

        Ok(UpstreamAnswer {
            upstream: group.urls[0].clone(),
            status: *self.status.lock().unwrap(),
            headers: self.headers.lock().unwrap().clone(),
            body: self.body.lock().unwrap().clone(),
        })
    }
}
