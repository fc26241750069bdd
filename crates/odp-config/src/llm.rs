//! LLM backend configuration.

use odp_core::enums::LlmBackendKind;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_model() -> String {
    String::from("llama3.1:8b")
}

/// Ollama endpoint, honoring `OLLAMA_ENDPOINT` when set.
fn default_endpoint() -> String {
    std::env::var("OLLAMA_ENDPOINT").unwrap_or_else(|_| String::from("http://localhost:11434"))
}

const fn default_temperature() -> f32 {
    0.2
}

const fn default_max_tokens() -> u32 {
    1024
}

const fn default_timeout_secs() -> u64 {
    180
}

const fn default_context_size() -> u32 {
    4096
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Which backend generates stage outputs.
    #[serde(default)]
    pub backend: LlmBackendKind,

    /// Model tag for Ollama (e.g. `llama3.1:8b`).
    #[serde(default = "default_model")]
    pub model: String,

    /// Ollama server base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on generated tokens per call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout for remote backends.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// GGUF model file for the in-process backend.
    #[serde(default)]
    pub model_path: String,

    /// Context window for the in-process backend.
    #[serde(default = "default_context_size")]
    pub context_size: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackendKind::default(),
            model: default_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            model_path: String::new(),
            context_size: default_context_size(),
        }
    }
}

impl LlmConfig {
    /// Whether the in-process backend has a model file to load.
    #[must_use]
    pub fn has_local_model(&self) -> bool {
        !self.model_path.is_empty()
    }

    /// Reject values no backend can honor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a temperature outside
    /// `[0, 2]`, a zero token budget, or a local backend without a model path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature".into(),
                reason: format!("{} is outside [0, 2]", self.temperature),
            });
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.max_tokens".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.backend == LlmBackendKind::Local && !self.has_local_model() {
            return Err(ConfigError::InvalidValue {
                field: "llm.model_path".into(),
                reason: "the local backend needs a GGUF model file".into(),
            });
        }
        Ok(())
    }
}
