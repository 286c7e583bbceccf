use serde::{Deserialize, Serialize};

use crate::upstream::UpstreamGroups;

pub const DEFAULT_REGULAR_UPSTREAM: &str = "https://cloudflare-dns.com/dns-query";
pub const DEFAULT_ECS_UPSTREAM: &str = "https://dns.google/dns-query";
pub const DEFAULT_JSON_UPSTREAM: &str = "https://dns.google/resolve";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Wire-format upstreams used when the query carries no ECS.
    #[serde(default = "default_regular")]
    pub regular: Vec<String>,

    /// Wire-format upstreams used when the query carries ECS.
    #[serde(default = "default_ecs")]
    pub ecs: Vec<String>,

    /// JSON API upstreams.
    #[serde(default = "default_json")]
    pub json: Vec<String>,

    /// Deadline for the whole upstream race.
    #[serde(default = "default_race_timeout_ms")]
    pub race_timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            regular: default_regular(),
            ecs: default_ecs(),
            json: default_json(),
            race_timeout_ms: default_race_timeout_ms(),
        }
    }
}

impl UpstreamConfig {
    pub fn groups(&self) -> UpstreamGroups {
        UpstreamGroups::new(self.regular.clone(), self.ecs.clone(), self.json.clone())
    }
}

/// Splits a comma-separated URL list, dropping blank entries.
pub fn parse_csv_urls(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_regular() -> Vec<String> {
    vec![DEFAULT_REGULAR_UPSTREAM.to_string()]
}

fn default_ecs() -> Vec<String> {
    vec![DEFAULT_ECS_UPSTREAM.to_string()]
}

fn default_json() -> Vec<String> {
    vec![DEFAULT_JSON_UPSTREAM.to_string()]
}

fn default_race_timeout_ms() -> u64 {
    5000
}
