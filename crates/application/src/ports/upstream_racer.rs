use async_trait::async_trait;
use doh_relay_domain::{DomainError, UpstreamAnswer, UpstreamGroup, UpstreamQuery};

#[async_trait]
pub trait UpstreamRacer: Send + Sync {
    /// Send `query` to every upstream of `group` at once and return the
    /// first successful (2xx) answer.
    ///
    /// Fails with `AllUpstreamsFailed` when no upstream succeeds, carrying
    /// one failure per upstream.
    async fn race(
        &self,
        group: &UpstreamGroup,
        query: &UpstreamQuery,
    ) -> Result<UpstreamAnswer, DomainError>;
}
