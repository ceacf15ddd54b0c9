//! Text-generation engine backed by an OpenAI-compatible endpoint.
//!
//! `TextGenEngine` calls any `/v1/chat/completions` endpoint — Ollama
//! (OpenAI mode), OpenAI, Groq, LM Studio, vLLM. All connection details come
//! from [`TextGenConfig`]; nothing is hardcoded. The call is blocking: the
//! shell invokes it synchronously from the UI thread and waits for the
//! result.

use crate::config::TextGenConfig;
use crate::model::engine::{EngineError, ModelEngine};

// ---------------------------------------------------------------------------
// TextGenEngine
// ---------------------------------------------------------------------------

/// Generates text from a prompt via an OpenAI-compatible chat endpoint.
///
/// Exactly one candidate is requested per run and the output is capped at
/// `config.max_tokens` tokens.
pub struct TextGenEngine {
    client: reqwest::blocking::Client,
    config: TextGenConfig,
}

impl std::fmt::Debug for TextGenEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextGenEngine")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl TextGenEngine {
    /// Build a `TextGenEngine` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.
    ///
    /// # Errors
    ///
    /// [`EngineError::ContextInit`] — the HTTP client could not be built.
    pub fn from_config(config: &TextGenConfig) -> Result<Self, EngineError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::ContextInit(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

impl ModelEngine for TextGenEngine {
    /// Send `input` as the user message and return the generated text.
    ///
    /// The `Authorization: Bearer …` header is attached **only** when
    /// `config.api_key` is `Some(key)` and `key` is non-empty — safe for
    /// Ollama and other local providers that require no authentication.
    fn run(&self, input: &str) -> Result<String, EngineError> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "user", "content": input }
            ],
            "stream":      false,
            "n":           1,
            "temperature": self.config.temperature,
            "max_tokens":  self.config.max_tokens
        });

        let mut req = self.client.post(&url).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send()?;

        let json: serde_json::Value = response
            .json()
            .map_err(|e| EngineError::Parse(e.to_string()))?;

        let generated = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(EngineError::EmptyResponse)?
            .trim()
            .to_string();

        if generated.is_empty() {
            return Err(EngineError::EmptyResponse);
        }

        Ok(generated)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
