//! Generation + extraction under a retry policy.

use serde_json::{Map, Value};

use crate::error::LlmError;
use crate::extract::extract_json_object;
use crate::retry::RetryPolicy;
use crate::LlmBackend;

/// Default sampling temperature for stage calls.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Default generation budget per stage call.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Calls an [`LlmBackend`] and extracts the JSON object from its output,
/// retrying any failure according to a [`RetryPolicy`].
///
/// Callers only see the final outcome: the first successful extraction, or
/// the error of the last attempt.
pub struct JsonCaller<B> {
    backend: B,
    policy: RetryPolicy,
    temperature: f32,
    max_tokens: u32,
}

impl<B: LlmBackend> JsonCaller<B> {
    #[must_use]
    pub const fn new(backend: B, policy: RetryPolicy) -> Self {
        Self {
            backend,
            policy,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the sampling temperature and token budget.
    #[must_use]
    pub const fn with_generation(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Generate a response to `prompt` and return its embedded JSON object.
    ///
    /// # Errors
    ///
    /// Returns the [`LlmError`] of the last attempt once
    /// `policy.max_attempts` attempts have failed.
    pub async fn call(&self, prompt: &str) -> Result<Map<String, Value>, LlmError> {
        let mut attempt = 1;
        loop {
            match self.attempt(prompt).await {
                Ok(object) => return Ok(object),
                Err(error) if attempt < self.policy.max_attempts => {
                    let delay = self.policy.delay_before_retry(attempt);
                    tracing::warn!(
                        backend = self.backend.name(),
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        ?delay,
                        %error,
                        "LLM call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    tracing::warn!(
                        backend = self.backend.name(),
                        attempt,
                        %error,
                        "LLM call failed, giving up"
                    );
                    return Err(error);
                }
            }
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<Map<String, Value>, LlmError> {
        let text = self
            .backend
            .generate(prompt, self.temperature, self.max_tokens)
            .await?;
        extract_json_object(&text)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use pretty_assertions::assert_eq;

    /// Replays canned outputs and records every request it receives.
    struct Scripted {
        outputs: Mutex<VecDeque<Result<String, LlmError>>>,
        requests: Mutex<Vec<(f32, u32)>>,
    }

    impl Scripted {
        fn new(outputs: Vec<Result<String, LlmError>>) -> Self {
            Self {
                outputs: Mutex::new(outputs.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl LlmBackend for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn generate(
            &self,
            _prompt: &str,
            temperature: f32,
            max_tokens: u32,
        ) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push((temperature, max_tokens));
            self.outputs
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(LlmError::Local("script exhausted".into())))
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            multiplier: 2,
            max_delay: Duration::from_millis(4),
        }
    }

    #[tokio::test]
    async fn first_attempt_success() {
        let caller = JsonCaller::new(
            Scripted::new(vec![Ok(r#"{"scenario": "s"}"#.into())]),
            fast_policy(3),
        );
        let object = caller.call("prompt").await.unwrap();
        assert_eq!(object["scenario"], "s");
        assert_eq!(caller.backend().calls(), 1);
    }

    #[tokio::test]
    async fn recovers_from_extraction_and_transport_failures() {
        let caller = JsonCaller::new(
            Scripted::new(vec![
                Ok("no json here".into()),
                Err(LlmError::Api {
                    status: 503,
                    message: "loading model".into(),
                }),
                Ok(r#"Here: {"intent": "i"}"#.into()),
            ]),
            fast_policy(3),
        );
        let object = caller.call("prompt").await.unwrap();
        assert_eq!(object["intent"], "i");
        assert_eq!(caller.backend().calls(), 3);
    }

    #[tokio::test]
    async fn exhausts_after_max_attempts_with_last_error() {
        let caller = JsonCaller::new(
            Scripted::new(vec![
                Ok("no json".into()),
                Ok("still no json".into()),
                Ok("{broken json}".into()),
                Ok(r#"{"never": "reached"}"#.into()),
            ]),
            fast_policy(3),
        );
        let err = caller.call("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)), "{err:?}");
        assert_eq!(caller.backend().calls(), 3);
    }

    #[tokio::test]
    async fn no_retry_policy_makes_one_attempt() {
        let caller = JsonCaller::new(
            Scripted::new(vec![Ok("nothing".into()), Ok("{}".into())]),
            RetryPolicy::no_retry(),
        );
        assert!(matches!(
            caller.call("prompt").await,
            Err(LlmError::Extraction)
        ));
        assert_eq!(caller.backend().calls(), 1);
    }

    #[tokio::test]
    async fn passes_generation_settings() {
        let caller = JsonCaller::new(Scripted::new(vec![Ok("{}".into())]), fast_policy(1));
        caller.call("prompt").await.unwrap();
        let requests = caller.backend().requests.lock().unwrap().clone();
        assert_eq!(requests, vec![(DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)]);

        let caller = JsonCaller::new(Scripted::new(vec![Ok("{}".into())]), fast_policy(1))
            .with_generation(0.7, 256);
        caller.call("prompt").await.unwrap();
        let requests = caller.backend().requests.lock().unwrap().clone();
        assert_eq!(requests, vec![(0.7, 256)]);
    }

    #[test]
    fn keeps_the_policy_it_was_built_with() {
        let caller = JsonCaller::new(Scripted::new(Vec::new()), fast_policy(5));
        assert_eq!(caller.policy(), &fast_policy(5));
        assert_eq!(caller.policy().schedule().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn default_policy_waits_one_then_two_seconds() {
        let caller = JsonCaller::new(
            Scripted::new(vec![Ok("x".into()), Ok("y".into()), Ok("z".into())]),
            RetryPolicy::default(),
        );
        let started = tokio::time::Instant::now();
        assert!(caller.call("prompt").await.is_err());
        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(3), "{waited:?}");
        assert!(waited < Duration::from_secs(4), "{waited:?}");
        assert_eq!(caller.backend().calls(), 3);
    }
}
