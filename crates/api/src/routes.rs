use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{any, get},
    Router,
};
use doh_relay_domain::doh_request::{PATH_SUFFIX_AUTO_ECS, PATH_SUFFIX_NO_ECS};

/// Routes the DoH endpoint at `path` plus its `/no_ecs` and `/auto_ecs`
/// variants. Every method reaches the handler so unsupported ones get a 405
/// from the relay itself.
pub fn create_doh_routes(state: AppState, path: &str) -> Router {
    let base = path.trim_end_matches('/');
    let root = if base.is_empty() { "/" } else { base };

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(root, any(handlers::handle_doh))
        .route(&format!("{}{}", base, PATH_SUFFIX_NO_ECS), any(handlers::handle_doh))
        .route(&format!("{}{}", base, PATH_SUFFIX_AUTO_ECS), any(handlers::handle_doh))
        .with_state(state)
}
