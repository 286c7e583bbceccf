use super::outbound::build_outbound_request;
use super::transport::{DohTransport, TransportError};
use async_trait::async_trait;
use doh_relay_application::ports::UpstreamRacer;
use doh_relay_domain::{
    DomainError, UpstreamAnswer, UpstreamFailure, UpstreamGroup, UpstreamQuery,
};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Races every upstream of a group and keeps the first 2xx answer.
///
/// The whole race shares one deadline. Requests still in flight when the
/// race ends are aborted, including when the caller drops the future.
pub struct ParallelRacer {
    transport: Arc<dyn DohTransport>,
    race_timeout: Duration,
}

impl ParallelRacer {
    pub fn new(transport: Arc<dyn DohTransport>, race_timeout: Duration) -> Self {
        Self {
            transport,
            race_timeout,
        }
    }
}

/// Aborts the spawned upstream requests when the race is over.
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

#[async_trait]
impl UpstreamRacer for ParallelRacer {
    async fn race(
        &self,
        group: &UpstreamGroup,
        query: &UpstreamQuery,
    ) -> Result<UpstreamAnswer, DomainError> {
        if group.is_empty() {
            return Err(DomainError::ServiceMisconfiguration(format!(
                "no upstream servers configured for the {} group",
                group.kind
            )));
        }

        debug!(
            strategy = "parallel",
            group = %group.kind,
            upstreams = group.len(),
            transport = self.transport.protocol_name(),
            "Racing all upstreams"
        );

        let mut abort_handles = AbortOnDrop(Vec::with_capacity(group.len()));
        let mut futs = FuturesUnordered::new();

        for url in group.urls.iter() {
            let upstream = url.clone();
            let transport = Arc::clone(&self.transport);
            let query = query.clone();
            let handle = tokio::spawn(async move {
                fetch_and_validate(transport.as_ref(), &upstream, &query).await
            });
            abort_handles.0.push(handle.abort_handle());

            let upstream = url.clone();
            futs.push(async move { (upstream, handle.await) });
        }

        let result = timeout(self.race_timeout, async {
            let mut failures = Vec::with_capacity(group.len());
            while let Some((upstream, join_result)) = futs.next().await {
                match join_result {
                    Ok(Ok(answer)) => {
                        debug!(upstream = %answer.upstream, status = answer.status.as_u16(), "Fastest response");
                        return Ok(answer);
                    }
                    Ok(Err(e)) => {
                        debug!(upstream = %upstream, error = %e, "Upstream failed");
                        failures.push(UpstreamFailure::new(upstream, e.to_string()));
                    }
                    Err(e) => {
                        warn!(upstream = %upstream, error = %e, "Upstream task panicked");
                        failures.push(UpstreamFailure::new(upstream, "task failed"));
                    }
                }
            }
            Err(DomainError::AllUpstreamsFailed(failures))
        })
        .await;

        drop(abort_handles);

        match result {
            Ok(Ok(answer)) => Ok(answer),
            Ok(Err(e)) => {
                warn!(group = %group.kind, error = %e, "Upstream race lost");
                Err(e)
            }
            Err(_) => {
                let timeout_ms = self.race_timeout.as_millis() as u64;
                warn!(group = %group.kind, timeout_ms, "Upstream race timed out");
                Err(DomainError::UpstreamTimeout { timeout_ms })
            }
        }
    }
}

async fn fetch_and_validate(
    transport: &dyn DohTransport,
    upstream: &str,
    query: &UpstreamQuery,
) -> Result<UpstreamAnswer, TransportError> {
    let request = build_outbound_request(upstream, query)?;
    let response = transport.send(request).await?;

    if !response.status.is_success() {
        return Err(TransportError::Status(response.status.as_u16()));
    }

    Ok(UpstreamAnswer {
        upstream: upstream.to_string(),
        status: response.status,
        headers: response.headers,
        body: response.body,
    })
}
