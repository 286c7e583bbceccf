pub mod https;
pub mod outbound;
pub mod parallel;
pub mod transport;

pub use https::HttpsTransport;
pub use outbound::build_outbound_request;
pub use parallel::ParallelRacer;
pub use transport::{DohTransport, OutboundRequest, TransportError, TransportResponse};
