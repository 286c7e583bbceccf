use doh_relay_domain::{CliOverrides, Config, UpstreamGroupKind};
use tracing::{error, info, warn};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        anyhow::anyhow!(e)
    })?;

    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    Ok(config)
}

pub fn log_startup_summary(config: &Config) {
    let groups = config.upstream.groups();

    for kind in [
        UpstreamGroupKind::Regular,
        UpstreamGroupKind::Ecs,
        UpstreamGroupKind::Json,
    ] {
        let group = groups.get(kind);
        if group.is_empty() {
            warn!(group = %kind, "No upstream servers configured; requests for this group will fail");
        } else {
            info!(group = %kind, upstreams = ?group.urls, "Upstream group");
        }
    }

    info!(
        auto_add_ecs = config.ecs.auto_add,
        ipv4_prefix = config.ecs.ipv4_prefix_length,
        ipv6_prefix = config.ecs.ipv6_prefix_length,
        force_padding = config.response.force_padding,
        race_timeout_ms = config.upstream.race_timeout_ms,
        "Relay settings"
    );
}
