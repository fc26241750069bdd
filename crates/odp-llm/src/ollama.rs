//! Ollama inference server backend.
//!
//! Uses the non-streaming `POST /api/generate` endpoint; the generated text
//! is the `response` field of the reply.

use std::time::Duration;

use odp_config::LlmConfig;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::http::check_response;
use crate::LlmBackend;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// HTTP client for an Ollama-compatible server.
pub struct OllamaBackend {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaBackend {
    /// Create a backend talking to `endpoint` (e.g. `http://localhost:11434`).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` fails
    /// to build.
    pub fn new(
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .user_agent("text2odp/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    /// Create a backend from the `[llm]` config section.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Self::new(
            config.model.clone(),
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint.trim_end_matches('/'))
    }
}

impl LlmBackend for OllamaBackend {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature,
                num_predict: max_tokens,
            },
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "ollama generate");
        let resp = check_response(self.http.post(self.generate_url()).json(&body).send().await?)
            .await?;
        let data: GenerateResponse = resp.json().await?;
        Ok(data.response)
    }
}
