pub mod builders;
pub mod mock_transport;

#[allow(unused_imports)]
pub use builders::*;
#[allow(unused_imports)]
pub use mock_transport::*;
