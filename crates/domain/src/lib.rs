//! DoH Relay Domain Layer
pub mod config;
pub mod dns_message;
pub mod doh_request;
pub mod edns;
pub mod errors;
pub mod ip_address;
pub mod upstream;

pub use config::{CliOverrides, Config};
pub use dns_message::DnsMessage;
pub use doh_request::{EcsBehavior, InboundRequest, RequestContext, ResponseFormat};
pub use edns::{append_ecs_option, contains_meaningful_ecs, EcsOption};
pub use errors::DomainError;
pub use ip_address::{parse_ip_address, AddressFamily, ParsedIpAddress};
pub use upstream::{
    UpstreamAnswer, UpstreamFailure, UpstreamGroup, UpstreamGroupKind, UpstreamGroups,
    UpstreamQuery,
};
