use doh_relay_domain::Config;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// RUST_LOG, when set, takes precedence over the configured level.
pub fn init_logging(config: &Config) {
    let level = config
        .logging
        .effective_level()
        .parse::<Level>()
        .unwrap_or(Level::INFO);

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
