//! Core `ModelEngine` trait and error type.
//!
//! # Overview
//!
//! [`ModelEngine`] is the single contract both pipelines expose to the
//! application shell. It is object-safe and `Send + Sync` so engines can be
//! held behind `Box<dyn ModelEngine>` and swapped wholesale on reload.
//!
//! `input` is deliberately untyped text: the text-generation engine treats
//! it as a prompt, the speech engine as a filesystem path. The shell knows
//! which engine it is talking to because the current input mode selected it.
//!
//! [`MockEngine`] (available under `#[cfg(test)]`) returns a pre-configured
//! response and records every input it was given — the shell tests use it to
//! observe exactly what reaches the engine boundary.

use thiserror::Error;

use crate::audio::AudioError;

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

/// All errors that can arise from an inference engine.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The GGML model file was not found at the given path.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// The inference backend failed to initialise.
    #[error("Model initialisation failed: {0}")]
    ContextInit(String),

    /// An error occurred during the Whisper inference pass.
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// The audio file could not be decoded.
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The text-generation request did not complete within the configured
    /// timeout.
    #[error("text generation request timed out")]
    Timeout,

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse model response: {0}")]
    Parse(String),

    /// The model returned a response with no usable text content.
    #[error("model returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for EngineError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            EngineError::Timeout
        } else {
            EngineError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ModelEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface shared by both inference pipelines.
///
/// # Contract
///
/// - [`TextGenEngine`](crate::model::TextGenEngine): `input` is a prompt;
///   the result is the generated text (one candidate, capped length).
/// - [`WhisperEngine`](crate::model::WhisperEngine): `input` is a path to an
///   audio file; the result is the transcript.
/// - A single synchronous call per invocation — no retries, no timeout
///   beyond what the backend itself enforces.
pub trait ModelEngine: Send + Sync {
    /// Run one inference pass over `input` and return its textual result.
    fn run(&self, input: &str) -> Result<String, EngineError>;
}

// Compile-time assertion: Box<dyn ModelEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn ModelEngine>) {}
};

// ---------------------------------------------------------------------------
// MockEngine  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response and records the
/// inputs it receives, so tests can observe exactly what crossed the engine
/// boundary.
#[cfg(test)]
pub struct MockEngine {
    response: Result<String, EngineError>,
    calls: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

#[cfg(test)]
impl MockEngine {
    /// Create a mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            calls: Default::default(),
        }
    }

    /// Create a mock that always returns `Err(error)`.
    pub fn err(error: EngineError) -> Self {
        Self {
            response: Err(error),
            calls: Default::default(),
        }
    }

    /// Shared handle to the recorded inputs, in call order.
    pub fn calls(&self) -> std::sync::Arc<std::sync::Mutex<Vec<String>>> {
        std::sync::Arc::clone(&self.calls)
    }
}

#[cfg(test)]
impl ModelEngine for MockEngine {
    fn run(&self, input: &str) -> Result<String, EngineError> {
        self.calls.lock().unwrap().push(input.to_string());
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- MockEngine ---

    #[test]
    fn mock_ok_returns_configured_text() {
        let engine = MockEngine::ok("result text");
        assert_eq!(engine.run("anything").unwrap(), "result text");
    }

    #[test]
    fn mock_err_returns_configured_error() {
        let engine = MockEngine::err(EngineError::Transcription("boom".into()));
        let err = engine.run("anything").unwrap_err();
        assert!(matches!(err, EngineError::Transcription(_)));
    }

    #[test]
    fn mock_records_inputs_in_order() {
        let engine = MockEngine::ok("x");
        let calls = engine.calls();
        let _ = engine.run("first");
        let _ = engine.run("second");
        assert_eq!(calls.lock().unwrap().as_slice(), ["first", "second"]);
    }

    // --- ModelEngine object safety ---

    #[test]
    fn box_dyn_model_engine_compiles() {
        // If this test compiles, the trait is object-safe.
        let engine: Box<dyn ModelEngine> = Box::new(MockEngine::ok("ok"));
        let _ = engine.run("input");
    }

    // --- EngineError display ---

    #[test]
    fn error_display_model_not_found() {
        let e = EngineError::ModelNotFound("/some/path.bin".into());
        assert!(e.to_string().contains("/some/path.bin"));
    }

    #[test]
    fn error_display_empty_response() {
        let e = EngineError::EmptyResponse;
        assert!(e.to_string().contains("empty"));
    }

    #[test]
    fn audio_error_converts_transparently() {
        let e: EngineError = AudioError::NoAudioTrack.into();
        assert_eq!(e.to_string(), AudioError::NoAudioTrack.to_string());
    }
}
