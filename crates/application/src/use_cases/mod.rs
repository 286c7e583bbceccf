pub mod handle_doh_request;

pub use handle_doh_request::HandleDohRequestUseCase;
