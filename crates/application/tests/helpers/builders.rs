#![allow(dead_code)]

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use bytes::Bytes;
use doh_relay_domain::InboundRequest;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::collections::HashMap;

pub const DNS_MESSAGE: &str = "application/dns-message";
pub const DNS_JSON: &str = "application/dns-json";

/// Wire-format A query for `domain`, optionally with an ECS option in an OPT record.
pub fn wire_query(domain: &str, ecs: Option<(u16, u8, &[u8])>) -> Vec<u8> {
    let arcount: u16 = if ecs.is_some() { 1 } else { 0 };
    let mut buf = vec![0xAB, 0xCD, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00];
    buf.extend_from_slice(&arcount.to_be_bytes());
    for label in domain.split('.') {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0x00);
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);

    if let Some((family, prefix, address)) = ecs {
        let mut option = Vec::new();
        option.extend_from_slice(&8u16.to_be_bytes());
        option.extend_from_slice(&((4 + address.len()) as u16).to_be_bytes());
        option.extend_from_slice(&family.to_be_bytes());
        option.push(prefix);
        option.push(0);
        option.extend_from_slice(address);

        buf.push(0x00);
        buf.extend_from_slice(&41u16.to_be_bytes());
        buf.extend_from_slice(&1232u16.to_be_bytes());
        buf.extend_from_slice(&[0, 0, 0, 0]);
        buf.extend_from_slice(&(option.len() as u16).to_be_bytes());
        buf.extend_from_slice(&option);
    }
    buf
}

pub struct InboundRequestBuilder {
    method: Method,
    path: String,
    headers: HeaderMap,
    query: HashMap<String, String>,
    body: Bytes,
}

impl InboundRequestBuilder {
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path).header("content-type", DNS_MESSAGE)
    }

    pub fn new(method: Method, path: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static(DNS_MESSAGE));
        Self {
            method,
            path: path.to_string(),
            headers,
            query: HashMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
        self
    }

    pub fn without_header(mut self, name: &str) -> Self {
        self.headers.remove(name);
        self
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    pub fn dns_param(self, message: &[u8]) -> Self {
        let encoded = URL_SAFE_NO_PAD.encode(message);
        self.param("dns", &encoded)
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> InboundRequest {
        InboundRequest {
            method: self.method,
            path: self.path,
            headers: self.headers,
            query: self.query,
            body: self.body,
        }
    }
}
