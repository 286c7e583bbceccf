use bytes::Bytes;
use http::{HeaderMap, Method};
use std::collections::HashMap;
use std::fmt;

pub const CONTENT_TYPE_DNS_MESSAGE: &str = "application/dns-message";
pub const CONTENT_TYPE_DNS_JSON: &str = "application/dns-json";

/// Path suffix that disables ECS injection for one request.
pub const PATH_SUFFIX_NO_ECS: &str = "/no_ecs";
/// Path suffix that forces ECS injection for one request.
pub const PATH_SUFFIX_AUTO_ECS: &str = "/auto_ecs";

/// Query parameters forwarded verbatim to JSON upstreams, in this order.
pub const JSON_FORWARDED_PARAMS: [&str; 4] = ["name", "type", "cd", "do"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// RFC 8484 wire format.
    Message,
    /// JSON resolution API (`name` / `type` parameters).
    Json,
}

impl ResponseFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ResponseFormat::Message => CONTENT_TYPE_DNS_MESSAGE,
            ResponseFormat::Json => CONTENT_TYPE_DNS_JSON,
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content_type())
    }
}

/// Per-request override of the global auto-ECS toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EcsBehavior {
    #[default]
    Default,
    ForceEnable,
    ForceDisable,
}

impl EcsBehavior {
    pub fn from_path(path: &str) -> Self {
        if path.ends_with(PATH_SUFFIX_NO_ECS) {
            EcsBehavior::ForceDisable
        } else if path.ends_with(PATH_SUFFIX_AUTO_ECS) {
            EcsBehavior::ForceEnable
        } else {
            EcsBehavior::Default
        }
    }

    /// Whether the relay should try to add ECS, given the global toggle.
    pub fn wants_injection(self, auto_add_enabled: bool) -> bool {
        match self {
            EcsBehavior::ForceEnable => true,
            EcsBehavior::ForceDisable => false,
            EcsBehavior::Default => auto_add_enabled,
        }
    }
}

/// The raw pieces of an inbound HTTP request, before validation.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub query: HashMap<String, String>,
    pub body: Bytes,
}

impl InboundRequest {
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Validated, typed view of one DoH request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: Method,
    pub format: ResponseFormat,
    pub ecs_behavior: EcsBehavior,
    /// The client's Accept header, forwarded to upstreams.
    pub accept: String,
    /// Allow-listed JSON API parameters present on the request.
    pub json_params: Vec<(String, String)>,
    pub ecs_present_originally: bool,
    pub ecs_added_by_proxy: bool,
}

impl RequestContext {
    pub fn new(method: Method, format: ResponseFormat, ecs_behavior: EcsBehavior, accept: String) -> Self {
        Self {
            method,
            format,
            ecs_behavior,
            accept,
            json_params: Vec::new(),
            ecs_present_originally: false,
            ecs_added_by_proxy: false,
        }
    }

    pub fn with_json_params(mut self, params: Vec<(String, String)>) -> Self {
        self.json_params = params;
        self
    }

    pub fn has_ecs(&self) -> bool {
        self.ecs_present_originally || self.ecs_added_by_proxy
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }
}
