pub mod client_ip;
pub mod request_classifier;
pub mod response_shaper;
pub mod upstream_selector;

pub use client_ip::client_ip_from_headers;
pub use request_classifier::{classify_request, ClassifiedRequest};
pub use response_shaper::{pad_body, shape_response, DohResponse, PADDING_BLOCK_SIZE};
pub use upstream_selector::select_upstream_group;
