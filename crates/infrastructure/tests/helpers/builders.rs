#![allow(dead_code)]

use doh_relay_domain::{
    DnsMessage, ResponseFormat, UpstreamGroup, UpstreamGroupKind, UpstreamQuery,
};
use http::Method;

pub const DNS_MESSAGE: &str = "application/dns-message";
pub const DNS_JSON: &str = "application/dns-json";

/// Minimal 12-byte header plus a question for example.com A.
pub fn sample_message() -> DnsMessage {
    let mut buf = vec![0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    buf.extend_from_slice(b"\x07example\x03com\x00\x00\x01\x00\x01");
    DnsMessage::from_bytes(buf).unwrap()
}

pub fn wire_query(method: Method) -> UpstreamQuery {
    UpstreamQuery {
        method,
        format: ResponseFormat::Message,
        accept: DNS_MESSAGE.to_string(),
        message: Some(sample_message()),
        json_params: Vec::new(),
    }
}

pub fn json_query(params: &[(&str, &str)]) -> UpstreamQuery {
    UpstreamQuery {
        method: Method::GET,
        format: ResponseFormat::Json,
        accept: DNS_JSON.to_string(),
        message: None,
        json_params: params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

pub fn group(urls: &[&str]) -> UpstreamGroup {
    UpstreamGroup::new(
        UpstreamGroupKind::Regular,
        urls.iter().map(|u| u.to_string()).collect(),
    )
}
