use serde::{Deserialize, Serialize};

use crate::ip_address::AddressFamily;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EcsConfig {
    /// Add ECS to wire-format queries that lack it, unless the request path opts out.
    #[serde(default)]
    pub auto_add: bool,

    #[serde(default = "default_ipv4_prefix_length")]
    pub ipv4_prefix_length: u8,

    #[serde(default = "default_ipv6_prefix_length")]
    pub ipv6_prefix_length: u8,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            auto_add: false,
            ipv4_prefix_length: default_ipv4_prefix_length(),
            ipv6_prefix_length: default_ipv6_prefix_length(),
        }
    }
}

impl EcsConfig {
    pub fn prefix_length(&self, family: AddressFamily) -> u8 {
        match family {
            AddressFamily::Ipv4 => self.ipv4_prefix_length,
            AddressFamily::Ipv6 => self.ipv6_prefix_length,
        }
    }
}

pub(crate) fn default_ipv4_prefix_length() -> u8 {
    24
}

pub(crate) fn default_ipv6_prefix_length() -> u8 {
    56
}
