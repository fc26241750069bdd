//! In-process GGUF inference via llama.cpp.
//!
//! llama.cpp is synchronous, so each generation runs on the blocking pool:
//!
//! ```ignore
//! let text = tokio::task::spawn_blocking(move || runtime.generate(&prompt, t, n)).await??;
//! ```
//!
//! The model is loaded once; a fresh context is created per call so calls
//! never share KV-cache state.

use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;

use llama_cpp_2::context::params::LlamaContextParams;
use llama_cpp_2::llama_backend::LlamaBackend;
use llama_cpp_2::llama_batch::LlamaBatch;
use llama_cpp_2::model::params::LlamaModelParams;
use llama_cpp_2::model::{AddBos, LlamaModel, Special};
use llama_cpp_2::sampling::LlamaSampler;
use odp_config::LlmConfig;

use crate::error::LlmError;
use crate::LlmBackend;

const SAMPLER_SEED: u32 = 1234;

fn local_err(e: impl std::fmt::Display) -> LlmError {
    LlmError::Local(e.to_string())
}

struct Runtime {
    backend: LlamaBackend,
    model: LlamaModel,
    context_size: u32,
}

/// Local text generation backed by a GGUF model file.
#[derive(Clone)]
pub struct LocalBackend {
    runtime: Arc<Runtime>,
}

impl LocalBackend {
    /// Load the model at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Local`] if llama.cpp cannot initialize or the
    /// file is not a loadable model.
    pub fn load(path: impl AsRef<Path>, context_size: u32) -> Result<Self, LlmError> {
        let path = path.as_ref();
        let backend = LlamaBackend::init().map_err(local_err)?;
        let model = LlamaModel::load_from_file(&backend, path, &LlamaModelParams::default())
            .map_err(|e| LlmError::Local(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), context_size, "loaded local model");
        Ok(Self {
            runtime: Arc::new(Runtime {
                backend,
                model,
                context_size,
            }),
        })
    }

    /// Load the model named by `[llm] model_path`.
    ///
    /// # Errors
    ///
    /// [`LlmError::Unavailable`] when no model path is configured, otherwise
    /// same as [`Self::load`].
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        if !config.has_local_model() {
            return Err(LlmError::Unavailable {
                backend: "local",
                reason: "llm.model_path is not set".into(),
            });
        }
        Self::load(&config.model_path, config.context_size)
    }
}

impl Runtime {
    fn generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String, LlmError> {
        let params = LlamaContextParams::default().with_n_ctx(NonZeroU32::new(self.context_size));
        let mut ctx = self
            .model
            .new_context(&self.backend, params)
            .map_err(local_err)?;

        let tokens = self
            .model
            .str_to_token(prompt, AddBos::Always)
            .map_err(local_err)?;
        let budget = self.context_size as usize;
        if tokens.is_empty() {
            return Err(LlmError::Local("prompt produced no tokens".into()));
        }
        if tokens.len() >= budget {
            return Err(LlmError::Local(format!(
                "prompt is {} tokens, context holds {budget}",
                tokens.len()
            )));
        }

        let mut batch = LlamaBatch::new(budget, 1);
        let last = tokens.len() - 1;
        for (index, token) in tokens.iter().copied().enumerate() {
            let pos = i32::try_from(index).map_err(local_err)?;
            batch
                .add(token, pos, &[0], index == last)
                .map_err(local_err)?;
        }
        ctx.decode(&mut batch).map_err(local_err)?;

        let mut sampler = if temperature <= 0.0 {
            LlamaSampler::greedy()
        } else {
            LlamaSampler::chain_simple([
                LlamaSampler::temp(temperature),
                LlamaSampler::dist(SAMPLER_SEED),
            ])
        };

        let steps = decode_budget(tokens.len(), budget, max_tokens);
        if steps < usize::try_from(max_tokens).unwrap_or(usize::MAX) {
            tracing::debug!(
                prompt_tokens = tokens.len(),
                context_size = budget,
                max_tokens,
                steps,
                "generation clamped to remaining context"
            );
        }

        let mut output = String::new();
        let mut position = i32::try_from(tokens.len()).map_err(local_err)?;
        for _ in 0..steps {
            let token = sampler.sample(&ctx, batch.n_tokens() - 1);
            sampler.accept(token);
            if self.model.is_eog_token(token) {
                break;
            }
            output.push_str(
                &self
                    .model
                    .token_to_str(token, Special::Tokenize)
                    .map_err(local_err)?,
            );

            batch.clear();
            batch.add(token, position, &[0], true).map_err(local_err)?;
            position += 1;
            ctx.decode(&mut batch).map_err(local_err)?;
        }
        Ok(output)
    }
}

/// Tokens that can be generated after a prompt of `prompt_tokens`:
/// `max_tokens`, capped by what is left of the context window.
fn decode_budget(prompt_tokens: usize, context_size: usize, max_tokens: u32) -> usize {
    context_size
        .saturating_sub(prompt_tokens)
        .min(usize::try_from(max_tokens).unwrap_or(usize::MAX))
}

impl LlmBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let runtime = Arc::clone(&self.runtime);
        let prompt = prompt.to_owned();
        tokio::task::spawn_blocking(move || runtime.generate(&prompt, temperature, max_tokens))
            .await
            .map_err(local_err)?
    }
}
