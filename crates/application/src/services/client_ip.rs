use http::HeaderMap;

pub const CF_CONNECTING_IP: &str = "cf-connecting-ip";
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Returns the client IP literal and the header it came from.
///
/// `cf-connecting-ip` wins; otherwise the first entry of `x-forwarded-for`.
/// Neither header is authenticated, so a client reaching the relay directly
/// can choose the subnet that gets injected.
pub fn client_ip_from_headers(headers: &HeaderMap) -> Option<(String, &'static str)> {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(ip) = header_value(CF_CONNECTING_IP) {
        return Some((ip.to_string(), CF_CONNECTING_IP));
    }

    header_value(X_FORWARDED_FOR)
        .and_then(|list| list.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(|ip| (ip.to_string(), X_FORWARDED_FOR))
}
