use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ResponseConfig {
    /// Zero-pad wire-format response bodies to a multiple of 128 bytes.
    #[serde(default)]
    pub force_padding: bool,
}
