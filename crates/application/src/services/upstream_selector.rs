use doh_relay_domain::{
    DomainError, RequestContext, ResponseFormat, UpstreamGroup, UpstreamGroupKind, UpstreamGroups,
};

/// Picks the upstream group for a request whose ECS state is final.
pub fn select_upstream_group<'a>(
    groups: &'a UpstreamGroups,
    context: &RequestContext,
) -> Result<&'a UpstreamGroup, DomainError> {
    let kind = match context.format {
        ResponseFormat::Json => UpstreamGroupKind::Json,
        ResponseFormat::Message if context.has_ecs() => UpstreamGroupKind::Ecs,
        ResponseFormat::Message => UpstreamGroupKind::Regular,
    };

    let group = groups.get(kind);
    if group.is_empty() {
        return Err(DomainError::ServiceMisconfiguration(format!(
            "no upstream servers configured for the {} group",
            kind
        )));
    }

    Ok(group)
}
