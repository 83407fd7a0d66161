//! Report-share configuration.

use serde::{Deserialize, Serialize};

/// Settings for the report-share registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Number of random bytes in a public share token (hex-encoded, so the
    /// token string is twice this length).
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            token_bytes: default_token_bytes(),
        }
    }
}

fn default_token_bytes() -> usize {
    32
}
