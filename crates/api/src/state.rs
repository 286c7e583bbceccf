use doh_relay_application::use_cases::HandleDohRequestUseCase;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub handle_doh: Arc<HandleDohRequestUseCase>,
}
