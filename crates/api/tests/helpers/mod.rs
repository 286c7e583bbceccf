pub mod mock_racer;

#[allow(unused_imports)]
pub use mock_racer::*;
