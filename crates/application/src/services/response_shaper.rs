use bytes::{Bytes, BytesMut};
use doh_relay_domain::{RequestContext, ResponseFormat, UpstreamAnswer};
use http::{header, HeaderMap, HeaderValue, StatusCode};
use tracing::debug;

pub const PADDING_BLOCK_SIZE: usize = 128;

pub const CACHE_CONTROL_CDN_ENABLED: &str = "s-maxage=600, stale-while-revalidate=600";
pub const CACHE_CONTROL_CDN_DISABLED: &str = "private, no-store, max-age=0";

const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const CORS_ALLOW_HEADERS: &str = "Content-Type, Accept";

/// Connection-scoped headers that must not be relayed (RFC 9110 §7.6.1).
const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "transfer-encoding",
    "te",
    "trailer",
    "upgrade",
    "proxy-authenticate",
    "proxy-authorization",
];

/// The response sent back to the DoH client.
#[derive(Debug, Clone)]
pub struct DohResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Turns the winning upstream answer into the client response: relayed
/// headers, CORS, cache policy, optional padding and a matching
/// Content-Length. The upstream status is kept as-is.
pub fn shape_response(
    answer: UpstreamAnswer,
    context: &RequestContext,
    force_padding: bool,
) -> DohResponse {
    let mut headers = answer.headers;
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );

    apply_cache_policy(&mut headers, context);

    let body = if force_padding && context.format == ResponseFormat::Message {
        pad_body(answer.body, PADDING_BLOCK_SIZE)
    } else {
        answer.body
    };

    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));

    DohResponse {
        status: answer.status,
        headers,
        body,
    }
}

fn apply_cache_policy(headers: &mut HeaderMap, context: &RequestContext) {
    if !context.is_get() {
        headers.remove(header::CACHE_CONTROL);
        return;
    }

    // A subnet the proxy chose makes the answer specific to this client.
    let value = if context.format == ResponseFormat::Message && context.ecs_added_by_proxy {
        CACHE_CONTROL_CDN_DISABLED
    } else {
        CACHE_CONTROL_CDN_ENABLED
    };
    debug!(cache_control = value, format = %context.format, "Cache policy applied");
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(value));
}

/// Zero-pads `body` up to the next multiple of `block_size`.
///
/// Empty and already aligned bodies are returned unchanged.
pub fn pad_body(body: Bytes, block_size: usize) -> Bytes {
    let original_len = body.len();
    if original_len == 0 || block_size == 0 {
        return body;
    }

    let padding = (block_size - original_len % block_size) % block_size;
    if padding == 0 {
        return body;
    }

    let mut padded = BytesMut::with_capacity(original_len + padding);
    padded.extend_from_slice(&body);
    padded.resize(original_len + padding, 0);
    debug!(
        original = original_len,
        padding,
        total = padded.len(),
        "Padded response body"
    );
    padded.freeze()
}
