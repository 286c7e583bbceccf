use crate::dns_message::DnsMessage;
use crate::doh_request::ResponseFormat;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamGroupKind {
    /// Wire-format queries without ECS.
    Regular,
    /// Wire-format queries carrying ECS.
    Ecs,
    /// JSON API queries.
    Json,
}

impl UpstreamGroupKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UpstreamGroupKind::Regular => "regular",
            UpstreamGroupKind::Ecs => "ecs",
            UpstreamGroupKind::Json => "json",
        }
    }
}

impl fmt::Display for UpstreamGroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamGroup {
    pub kind: UpstreamGroupKind,
    pub urls: Arc<[String]>,
}

impl UpstreamGroup {
    pub fn new(kind: UpstreamGroupKind, urls: Vec<String>) -> Self {
        Self {
            kind,
            urls: urls.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}

/// The three upstream groups the relay routes between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamGroups {
    pub regular: UpstreamGroup,
    pub ecs: UpstreamGroup,
    pub json: UpstreamGroup,
}

impl UpstreamGroups {
    pub fn new(regular: Vec<String>, ecs: Vec<String>, json: Vec<String>) -> Self {
        Self {
            regular: UpstreamGroup::new(UpstreamGroupKind::Regular, regular),
            ecs: UpstreamGroup::new(UpstreamGroupKind::Ecs, ecs),
            json: UpstreamGroup::new(UpstreamGroupKind::Json, json),
        }
    }

    pub fn get(&self, kind: UpstreamGroupKind) -> &UpstreamGroup {
        match kind {
            UpstreamGroupKind::Regular => &self.regular,
            UpstreamGroupKind::Ecs => &self.ecs,
            UpstreamGroupKind::Json => &self.json,
        }
    }
}

/// What to send to every upstream of a group.
#[derive(Debug, Clone)]
pub struct UpstreamQuery {
    pub method: Method,
    pub format: ResponseFormat,
    pub accept: String,
    /// Present for wire-format requests, possibly with ECS appended.
    pub message: Option<DnsMessage>,
    pub json_params: Vec<(String, String)>,
}

/// The winning upstream's response.
#[derive(Debug, Clone)]
pub struct UpstreamAnswer {
    pub upstream: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Why one upstream did not produce a usable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamFailure {
    pub upstream: String,
    pub reason: String,
}

impl UpstreamFailure {
    pub fn new(upstream: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            upstream: upstream.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.upstream, self.reason)
    }
}
