//! Engine construction — the one place that knows how to build engines.
//!
//! The shell never constructs a [`TextGenEngine`] or [`WhisperEngine`]
//! directly; it asks an [`EngineFactory`] for a boxed engine of the wanted
//! [`EngineKind`]. Startup and "Reload Models" both go through the factory,
//! which is what makes reload a wholesale replacement and lets tests swap in
//! an instrumented factory.

use crate::config::{AppConfig, AppPaths};
use crate::model::engine::{EngineError, ModelEngine};
use crate::model::textgen::TextGenEngine;
use crate::model::whisper::WhisperEngine;

// ---------------------------------------------------------------------------
// EngineKind
// ---------------------------------------------------------------------------

/// Task identifier selecting which pipeline an engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Prompt in, generated text out.
    TextGen,
    /// Audio file path in, transcript out.
    SpeechToText,
}

impl EngineKind {
    /// A short human-readable label for log lines and dialogs.
    pub fn label(&self) -> &'static str {
        match self {
            EngineKind::TextGen => "text generation",
            EngineKind::SpeechToText => "speech-to-text",
        }
    }
}

// ---------------------------------------------------------------------------
// EngineFactory trait
// ---------------------------------------------------------------------------

/// Builds a fresh engine for the given kind.
///
/// Construction is eager and may be slow (the Whisper GGML load) or fail
/// (missing model file, unbuildable HTTP client); the factory propagates
/// such failures to the caller unchanged.
pub trait EngineFactory: Send + Sync {
    fn build(&self, kind: EngineKind) -> Result<Box<dyn ModelEngine>, EngineError>;
}

// ---------------------------------------------------------------------------
// ConfigFactory
// ---------------------------------------------------------------------------

/// Production factory: builds engines from the loaded [`AppConfig`].
///
/// The speech model file stem from config is resolved against the platform
/// models directory as `<models_dir>/<model>.bin`.
pub struct ConfigFactory {
    config: AppConfig,
}

impl ConfigFactory {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Full path to the configured GGML model file.
    pub fn speech_model_path(&self) -> std::path::PathBuf {
        AppPaths::new()
            .models_dir
            .join(format!("{}.bin", self.config.speech.model))
    }
}

impl EngineFactory for ConfigFactory {
    fn build(&self, kind: EngineKind) -> Result<Box<dyn ModelEngine>, EngineError> {
        match kind {
            EngineKind::TextGen => {
                let engine = TextGenEngine::from_config(&self.config.textgen)?;
                Ok(Box::new(engine))
            }
            EngineKind::SpeechToText => {
                let engine = WhisperEngine::load(self.speech_model_path(), &self.config.speech)?;
                Ok(Box::new(engine))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_text_generation_engine_from_defaults() {
        let factory = ConfigFactory::new(AppConfig::default());
        assert!(factory.build(EngineKind::TextGen).is_ok());
    }

    #[test]
    fn speech_build_fails_when_the_model_file_is_absent() {
        let mut config = AppConfig::default();
        config.speech.model = "definitely-not-downloaded-model".into();
        let factory = ConfigFactory::new(config);

        let result = factory.build(EngineKind::SpeechToText);
        assert!(
            matches!(result, Err(EngineError::ModelNotFound(_))),
            "expected ModelNotFound, got: {:?}",
            result.err()
        );
    }

    #[test]
    fn speech_model_path_uses_the_configured_stem() {
        let mut config = AppConfig::default();
        config.speech.model = "ggml-medium".into();
        let factory = ConfigFactory::new(config);
        assert!(factory
            .speech_model_path()
            .ends_with("models/ggml-medium.bin"));
    }

    #[test]
    fn kind_labels() {
        assert_eq!(EngineKind::TextGen.label(), "text generation");
        assert_eq!(EngineKind::SpeechToText.label(), "speech-to-text");
    }
}
