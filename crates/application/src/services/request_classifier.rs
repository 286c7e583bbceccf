use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use doh_relay_domain::doh_request::{
    CONTENT_TYPE_DNS_JSON, CONTENT_TYPE_DNS_MESSAGE, JSON_FORWARDED_PARAMS,
};
use doh_relay_domain::{
    DnsMessage, DomainError, EcsBehavior, InboundRequest, RequestContext, ResponseFormat,
};
use http::{header, Method};

/// base64url that tolerates both padded and unpadded input.
const DNS_PARAM_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone)]
pub struct ClassifiedRequest {
    pub context: RequestContext,
    /// Present for wire-format requests.
    pub message: Option<DnsMessage>,
}

/// Validates an inbound request and works out what the client is asking for.
///
/// Checks run in a fixed order (method, Accept, then format-specific
/// parameters) and the first failure is returned.
pub fn classify_request(request: &InboundRequest) -> Result<ClassifiedRequest, DomainError> {
    if request.method != Method::GET && request.method != Method::POST {
        return Err(DomainError::MethodNotAllowed(request.method.to_string()));
    }

    let accept = request
        .header_str(header::ACCEPT.as_str())
        .filter(|accept| accepts_doh(accept))
        .ok_or(DomainError::NotAcceptable)?
        .to_string();

    let ecs_behavior = EcsBehavior::from_path(&request.path);

    if request.method == Method::GET {
        classify_get(request, accept, ecs_behavior)
    } else {
        classify_post(request, accept, ecs_behavior)
    }
}

fn classify_get(
    request: &InboundRequest,
    accept: String,
    ecs_behavior: EcsBehavior,
) -> Result<ClassifiedRequest, DomainError> {
    if let Some(encoded) = request.query.get("dns") {
        let decoded = DNS_PARAM_ENGINE.decode(encoded.as_bytes()).map_err(|e| {
            DomainError::InvalidRequest(format!("invalid base64url in 'dns' parameter: {}", e))
        })?;
        let message = DnsMessage::from_bytes(decoded)?;

        return Ok(ClassifiedRequest {
            context: RequestContext::new(Method::GET, ResponseFormat::Message, ecs_behavior, accept),
            message: Some(message),
        });
    }

    let json_requested = request
        .query
        .get("ct")
        .is_some_and(|ct| ct == CONTENT_TYPE_DNS_JSON)
        || accept.contains(CONTENT_TYPE_DNS_JSON);

    if !json_requested {
        return Err(DomainError::InvalidRequest(
            "GET requires a 'dns' parameter or a dns-json query".to_string(),
        ));
    }

    let json_params = JSON_FORWARDED_PARAMS
        .iter()
        .filter_map(|key| {
            request
                .query
                .get(*key)
                .map(|value| (key.to_string(), value.clone()))
        })
        .collect();

    Ok(ClassifiedRequest {
        context: RequestContext::new(Method::GET, ResponseFormat::Json, ecs_behavior, accept)
            .with_json_params(json_params),
        message: None,
    })
}

fn classify_post(
    request: &InboundRequest,
    accept: String,
    ecs_behavior: EcsBehavior,
) -> Result<ClassifiedRequest, DomainError> {
    let content_type = request.header_str(header::CONTENT_TYPE.as_str());
    if content_type != Some(CONTENT_TYPE_DNS_MESSAGE) {
        return Err(DomainError::UnsupportedMediaType(
            content_type.unwrap_or("none").to_string(),
        ));
    }

    if request.body.is_empty() {
        return Err(DomainError::InvalidRequest(
            "request body must not be empty".to_string(),
        ));
    }

    let message = DnsMessage::from_bytes(request.body.clone())?;

    Ok(ClassifiedRequest {
        context: RequestContext::new(Method::POST, ResponseFormat::Message, ecs_behavior, accept),
        message: Some(message),
    })
}

fn accepts_doh(accept: &str) -> bool {
    accept.contains(CONTENT_TYPE_DNS_MESSAGE) || accept.contains(CONTENT_TYPE_DNS_JSON)
}
