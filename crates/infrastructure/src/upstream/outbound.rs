use super::transport::{OutboundRequest, TransportError};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use doh_relay_domain::doh_request::CONTENT_TYPE_DNS_MESSAGE;
use doh_relay_domain::{ResponseFormat, UpstreamQuery};
use http::{header, HeaderMap, HeaderValue, Method};
use reqwest::Url;

/// Builds the request sent to one upstream of a group.
///
/// GET requests replace any query string on the upstream URL: wire-format
/// queries carry the message as an unpadded base64url `dns` parameter, JSON
/// queries carry the forwarded parameters. POST requests keep the URL as
/// configured and send the message as the body.
pub fn build_outbound_request(
    upstream: &str,
    query: &UpstreamQuery,
) -> Result<OutboundRequest, TransportError> {
    let mut url =
        Url::parse(upstream).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", upstream, e)))?;

    let mut headers = HeaderMap::new();
    let accept = HeaderValue::from_str(&query.accept)
        .map_err(|e| TransportError::InvalidHeader(e.to_string()))?;
    headers.insert(header::ACCEPT, accept);

    let mut body = None;

    if query.method == Method::GET {
        url.set_query(None);
        match (query.format, &query.message) {
            (ResponseFormat::Message, Some(message)) => {
                url.query_pairs_mut()
                    .append_pair("dns", &URL_SAFE_NO_PAD.encode(message.as_bytes()));
            }
            (ResponseFormat::Json, _) if !query.json_params.is_empty() => {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in &query.json_params {
                    pairs.append_pair(key, value);
                }
            }
            _ => {}
        }
    } else if let Some(message) = &query.message {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CONTENT_TYPE_DNS_MESSAGE),
        );
        body = Some(message.bytes());
    }

    Ok(OutboundRequest {
        method: query.method.clone(),
        url,
        headers,
        body,
    })
}
