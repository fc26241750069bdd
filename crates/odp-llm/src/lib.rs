//! # odp-llm
//!
//! LLM access for text2odp:
//! - [`LlmBackend`]: the `generate(prompt, temperature, max_tokens)` capability
//! - [`OllamaBackend`]: remote Ollama-compatible inference server
//! - `LocalBackend`: in-process GGUF inference via llama.cpp (feature `local`)
//! - [`Backend`]: the variant selected by `[llm] backend` in the config
//! - [`extract_json_object`]: pulls the JSON payload out of raw model text
//! - [`JsonCaller`]: generation + extraction under a [`RetryPolicy`]

mod caller;
mod error;
mod extract;
mod http;
#[cfg(feature = "local")]
mod local;
mod ollama;
mod retry;

use std::future::Future;

pub use caller::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, JsonCaller};
pub use error::LlmError;
pub use extract::extract_json_object;
#[cfg(feature = "local")]
pub use local::LocalBackend;
pub use ollama::OllamaBackend;
pub use retry::RetryPolicy;

use odp_config::LlmConfig;
use odp_core::enums::LlmBackendKind;

/// Text generation capability. Implementations must be shareable across
/// tasks; one call produces one completion.
pub trait LlmBackend: Send + Sync {
    /// Short backend identifier used in logs.
    fn name(&self) -> &'static str;

    /// Generate a completion for `prompt`.
    fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// The backend chosen by configuration.
pub enum Backend {
    Ollama(OllamaBackend),
    #[cfg(feature = "local")]
    Local(LocalBackend),
}

impl Backend {
    /// Build the backend named by `config.backend`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Unavailable`] when `local` is requested from a
    /// build without the `local` feature, or the construction error of the
    /// selected backend.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        match config.backend {
            LlmBackendKind::Ollama => Ok(Self::Ollama(OllamaBackend::from_config(config)?)),
            LlmBackendKind::Local => Self::local(config),
        }
    }

    #[cfg(feature = "local")]
    fn local(config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self::Local(LocalBackend::from_config(config)?))
    }

    #[cfg(not(feature = "local"))]
    fn local(_config: &LlmConfig) -> Result<Self, LlmError> {
        Err(LlmError::Unavailable {
            backend: LlmBackendKind::Local.as_str(),
            reason: "rebuild with `--features local` to enable in-process inference".into(),
        })
    }
}

impl LlmBackend for Backend {
    fn name(&self) -> &'static str {
        match self {
            Self::Ollama(backend) => backend.name(),
            #[cfg(feature = "local")]
            Self::Local(backend) => backend.name(),
        }
    }

    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        match self {
            Self::Ollama(backend) => backend.generate(prompt, temperature, max_tokens).await,
            #[cfg(feature = "local")]
            Self::Local(backend) => backend.generate(prompt, temperature, max_tokens).await,
        }
    }
}
