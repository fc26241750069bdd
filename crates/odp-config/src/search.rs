//! Paper search configuration.

use serde::{Deserialize, Serialize};

/// Semantic Scholar paper search endpoint.
fn default_endpoint() -> String {
    String::from("https://api.semanticscholar.org/graph/v1/paper/search")
}

const fn default_timeout_secs() -> u64 {
    60
}

const fn default_limit() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Optional Semantic Scholar API key, sent as `x-api-key`.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Papers to collect when `--limit` is not given.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            default_limit: default_limit(),
        }
    }
}

impl SearchConfig {
    /// The API key, if one is configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        (!self.api_key.is_empty()).then_some(self.api_key.as_str())
    }
}
