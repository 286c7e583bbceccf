use doh_relay_api::AppState;
use doh_relay_application::use_cases::HandleDohRequestUseCase;
use doh_relay_domain::Config;
use doh_relay_infrastructure::upstream::{HttpsTransport, ParallelRacer};
use std::sync::Arc;
use std::time::Duration;

pub struct Services {
    pub app_state: AppState,
}

impl Services {
    pub fn new(config: &Config) -> Self {
        let race_timeout = Duration::from_millis(config.upstream.race_timeout_ms);

        let transport = Arc::new(HttpsTransport::new(race_timeout));
        let racer = Arc::new(ParallelRacer::new(transport, race_timeout));

        let handle_doh = Arc::new(HandleDohRequestUseCase::new(
            racer,
            config.upstream.groups(),
            config.ecs.clone(),
            config.response.clone(),
        ));

        Self {
            app_state: AppState { handle_doh },
        }
    }
}
