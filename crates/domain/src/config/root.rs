use serde::{Deserialize, Serialize};

use super::ecs::{default_ipv4_prefix_length, default_ipv6_prefix_length, EcsConfig};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::response::ResponseConfig;
use super::server::ServerConfig;
use super::upstream::{parse_csv_urls, UpstreamConfig};

const LOCAL_CONFIG_PATH: &str = "doh-relay.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/doh-relay/config.toml";
const HEALTH_PATH: &str = "/health";

/// Main configuration structure for the DoH relay
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream groups and race deadline
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// EDNS Client Subnet injection
    #[serde(default)]
    pub ecs: EcsConfig,

    /// Response shaping
    #[serde(default)]
    pub response: ResponseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file, environment and command line
    ///
    /// Priority order (later wins):
    /// 1. Defaults
    /// 2. Explicit path, else doh-relay.toml, else /etc/doh-relay/config.toml
    /// 3. Environment variables
    /// 4. Command-line overrides
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply the deployment environment variables.
    ///
    /// URL lists that contain no usable entry and prefix lengths that are not
    /// positive integers fall back to the defaults.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(urls) = lookup("UPSTREAM_DOH_URLS").map(|v| parse_csv_urls(&v)) {
            if !urls.is_empty() {
                self.upstream.regular = urls;
            }
        }
        if let Some(urls) = lookup("ECS_UPSTREAM_DOH_URLS").map(|v| parse_csv_urls(&v)) {
            if !urls.is_empty() {
                self.upstream.ecs = urls;
            }
        }
        if let Some(urls) = lookup("JSON_UPSTREAM_DOH_URLS").map(|v| parse_csv_urls(&v)) {
            if !urls.is_empty() {
                self.upstream.json = urls;
            }
        }
        if let Some(value) = lookup("AUTO_ADD_ECS") {
            self.ecs.auto_add = parse_flag(&value);
        }
        if let Some(value) = lookup("IPV4_ECS_PREFIX_LENGTH") {
            self.ecs.ipv4_prefix_length =
                parse_prefix_length(&value).unwrap_or_else(default_ipv4_prefix_length);
        }
        if let Some(value) = lookup("IPV6_ECS_PREFIX_LENGTH") {
            self.ecs.ipv6_prefix_length =
                parse_prefix_length(&value).unwrap_or_else(default_ipv6_prefix_length);
        }
        if let Some(value) = lookup("FORCE_RESPONSE_PADDING") {
            self.response.force_padding = parse_flag(&value);
        }
        if let Some(value) = lookup("DEBUG_LOGGING") {
            self.logging.debug = parse_flag(&value);
        }
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    ///
    /// Empty upstream groups are accepted here; requests routed to one are
    /// answered with a misconfiguration error instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }

        if !self.server.path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "Endpoint path '{}' must start with '/'",
                self.server.path
            )));
        }

        if self.server.path.trim_end_matches('/') == HEALTH_PATH {
            return Err(ConfigError::Validation(format!(
                "Endpoint path cannot be {}",
                HEALTH_PATH
            )));
        }

        if self.upstream.race_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream race timeout must be greater than 0".to_string(),
            ));
        }

        if !(1..=32).contains(&self.ecs.ipv4_prefix_length) {
            return Err(ConfigError::Validation(format!(
                "IPv4 ECS prefix length {} is outside 1-32",
                self.ecs.ipv4_prefix_length
            )));
        }

        if !(1..=128).contains(&self.ecs.ipv6_prefix_length) {
            return Err(ConfigError::Validation(format!(
                "IPv6 ECS prefix length {} is outside 1-128",
                self.ecs.ipv6_prefix_length
            )));
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn parse_prefix_length(value: &str) -> Option<u8> {
    value.trim().parse::<u8>().ok().filter(|len| *len > 0)
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
