//! DoH Relay Infrastructure Layer
pub mod upstream;
