pub mod doh;
pub mod health;

pub use doh::handle_doh;
pub use health::health_check;
