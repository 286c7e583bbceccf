use crate::upstream::UpstreamFailure;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Not acceptable: Accept must include application/dns-message or application/dns-json")]
    NotAcceptable,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Service misconfiguration: {0}")]
    ServiceMisconfiguration(String),

    #[error("All {} upstream servers failed", .0.len())]
    AllUpstreamsFailed(Vec<UpstreamFailure>),

    #[error("Upstream race timed out after {timeout_ms}ms")]
    UpstreamTimeout { timeout_ms: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// True for errors caused by the client's request rather than the relay or its upstreams.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::MethodNotAllowed(_)
                | DomainError::NotAcceptable
                | DomainError::InvalidRequest(_)
                | DomainError::InvalidDnsMessage(_)
                | DomainError::UnsupportedMediaType(_)
        )
    }
}
