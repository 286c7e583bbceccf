#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_application::ports::UpstreamRacer;
use doh_relay_domain::{DomainError, UpstreamAnswer, UpstreamGroup, UpstreamGroupKind, UpstreamQuery};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use std::sync::Mutex;

/// Racer returning a fixed answer or error, remembering the groups it was asked to race.
pub struct MockUpstreamRacer {
    groups: Mutex<Vec<UpstreamGroupKind>>,
    queries: Mutex<Vec<UpstreamQuery>>,
    outcome: Mutex<Result<(StatusCode, &'static str, Bytes), DomainError>>,
}

impl MockUpstreamRacer {
    pub fn answering(status: StatusCode, content_type: &'static str, body: &'static [u8]) -> Self {
        Self {
            groups: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            outcome: Mutex::new(Ok((status, content_type, Bytes::from_static(body)))),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            groups: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            outcome: Mutex::new(Err(error)),
        }
    }

    pub fn groups(&self) -> Vec<UpstreamGroupKind> {
        self.groups.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<UpstreamQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamRacer for MockUpstreamRacer {
    async fn race(
        &self,
        group: &UpstreamGroup,
        query: &UpstreamQuery,
    ) -> Result<UpstreamAnswer, DomainError> {
        self.groups.lock().unwrap().push(group.kind);
        self.queries.lock().unwrap().push(query.clone());

        let (status, content_type, body) = self.outcome.lock().unwrap().clone()?;
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static(content_type));
        headers.insert("cache-control", HeaderValue::from_static("max-age=300"));
        Ok(UpstreamAnswer {
            upstream: group.urls[0].clone(),
            status,
            headers,
            body,
        })
    }
}
