use crate::ports::UpstreamRacer;
use crate::services::{
    classify_request, client_ip_from_headers, select_upstream_group, shape_response,
    ClassifiedRequest, DohResponse,
};
use doh_relay_domain::config::{EcsConfig, ResponseConfig};
use doh_relay_domain::{
    append_ecs_option, contains_meaningful_ecs, parse_ip_address, DnsMessage, DomainError,
    EcsOption, InboundRequest, RequestContext, UpstreamGroups, UpstreamQuery,
};
use http::HeaderMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Runs one DoH request through classification, ECS handling, upstream
/// selection, the upstream race and response shaping.
pub struct HandleDohRequestUseCase {
    racer: Arc<dyn UpstreamRacer>,
    groups: UpstreamGroups,
    ecs: EcsConfig,
    force_padding: bool,
}

impl HandleDohRequestUseCase {
    pub fn new(
        racer: Arc<dyn UpstreamRacer>,
        groups: UpstreamGroups,
        ecs: EcsConfig,
        response: ResponseConfig,
    ) -> Self {
        Self {
            racer,
            groups,
            ecs,
            force_padding: response.force_padding,
        }
    }

    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: InboundRequest) -> Result<DohResponse, DomainError> {
        let ClassifiedRequest {
            mut context,
            message,
        } = classify_request(&request)?;

        let message = message.map(|m| self.apply_ecs_policy(&mut context, m, &request.headers));

        let group = select_upstream_group(&self.groups, &context)?;
        debug!(
            group = %group.kind,
            upstreams = group.len(),
            has_ecs = context.has_ecs(),
            "Selected upstream group"
        );

        let query = UpstreamQuery {
            method: context.method.clone(),
            format: context.format,
            accept: context.accept.clone(),
            message,
            json_params: context.json_params.clone(),
        };

        let answer = self.racer.race(group, &query).await?;
        debug!(
            upstream = %answer.upstream,
            status = answer.status.as_u16(),
            body_len = answer.body.len(),
            "Upstream answered"
        );

        Ok(shape_response(answer, &context, self.force_padding))
    }

    /// Records whether the query already carries ECS and, when the policy
    /// asks for it, returns a copy with an ECS option for the client's subnet.
    fn apply_ecs_policy(
        &self,
        context: &mut RequestContext,
        message: DnsMessage,
        headers: &HeaderMap,
    ) -> DnsMessage {
        context.ecs_present_originally = contains_meaningful_ecs(message.as_bytes());
        if context.ecs_present_originally {
            debug!("Query already carries a client subnet");
            return message;
        }

        if !context.ecs_behavior.wants_injection(self.ecs.auto_add) {
            return message;
        }

        let Some((raw_ip, source)) = client_ip_from_headers(headers) else {
            debug!("No client IP header, ECS not added");
            return message;
        };

        let Some(ip) = parse_ip_address(&raw_ip) else {
            warn!(ip = %raw_ip, source, "Unparseable client IP, ECS not added");
            return message;
        };

        let prefix = self.ecs.prefix_length(ip.family());
        let ecs = EcsOption::for_client(&ip, prefix);

        match append_ecs_option(&message, &ecs) {
            Ok(injected) => {
                context.ecs_added_by_proxy = true;
                debug!(
                    ip = %ip,
                    source,
                    family = %ip.family(),
                    prefix = ecs.source_prefix_len(),
                    arcount = injected.ar_count(),
                    "Added client subnet"
                );
                injected
            }
            Err(e) => {
                warn!(error = %e, "Could not add client subnet");
                message
            }
        }
    }
}
