//! Speech-to-text engine backed by `whisper-rs`.
//!
//! `WhisperEngine` loads a GGML model eagerly at construction (slow, and it
//! fails when the file is absent or unreadable). Each [`run`] call decodes
//! the given audio file to 16 kHz mono f32, runs one inference pass on a
//! fresh `WhisperState`, and concatenates the segment texts.
//!
//! [`run`]: crate::model::ModelEngine::run

use std::path::Path;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::load_audio;
use crate::config::SpeechConfig;
use crate::model::engine::{EngineError, ModelEngine};

// ---------------------------------------------------------------------------
// WhisperEngine
// ---------------------------------------------------------------------------

/// Transcribes audio files with a local Whisper GGML model.
///
/// A new `WhisperState` is created for every inference call, so the engine
/// itself stays immutable after construction.
pub struct WhisperEngine {
    ctx: WhisperContext,
    language: String,
    threads: i32,
}

impl std::fmt::Debug for WhisperEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperEngine")
            .field("language", &self.language)
            .field("threads", &self.threads)
            .finish_non_exhaustive()
    }
}

// `WhisperContext` holds a raw pointer internally but declares
// `unsafe impl Send` and `unsafe impl Sync` in whisper-rs — the model
// weights are read-only after loading.
// SAFETY: WhisperContext is Send+Sync as declared by whisper-rs.
unsafe impl Send for WhisperEngine {}
unsafe impl Sync for WhisperEngine {}

impl WhisperEngine {
    /// Load a GGML model from `model_path` and prepare it for inference.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ModelNotFound`] — `model_path` does not exist.
    /// - [`EngineError::ContextInit`]  — whisper-rs failed to load the file.
    pub fn load(model_path: impl AsRef<Path>, config: &SpeechConfig) -> Result<Self, EngineError> {
        let path = model_path.as_ref();

        if !path.exists() {
            return Err(EngineError::ModelNotFound(path.display().to_string()));
        }

        let path_str = path.to_str().ok_or_else(|| {
            EngineError::ModelNotFound(format!(
                "model path contains non-UTF-8 characters: {}",
                path.display()
            ))
        })?;

        let ctx_params = WhisperContextParameters::default();
        let ctx = WhisperContext::new_with_params(path_str, ctx_params)
            .map_err(|e| EngineError::ContextInit(e.to_string()))?;

        Ok(Self {
            ctx,
            language: config.language.clone(),
            threads: config.threads,
        })
    }

    /// Run one inference pass over already-decoded 16 kHz mono samples.
    fn transcribe(&self, audio: &[f32]) -> Result<String, EngineError> {
        let mut fp = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        // set_language takes an Option<&str> whose lifetime is tied to fp.
        // Both `fp` and the borrow of `self.language` remain alive until
        // state.full() returns, so the borrow is valid.
        let lang: Option<&str> = if self.language == "auto" {
            None
        } else {
            Some(self.language.as_str())
        };
        fp.set_language(lang);
        fp.set_n_threads(self.threads);
        fp.set_print_progress(false);
        fp.set_print_realtime(false);

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| EngineError::ContextInit(e.to_string()))?;

        state
            .full(fp, audio)
            .map_err(|e| EngineError::Transcription(e.to_string()))?;

        let n_segments = state
            .full_n_segments()
            .map_err(|e| EngineError::Transcription(e.to_string()))?;

        let mut text = String::new();
        for i in 0..n_segments {
            let seg_text = state
                .full_get_segment_text(i)
                .map_err(|e| EngineError::Transcription(format!("segment {i}: {e}")))?;
            text.push_str(&seg_text);
        }

        Ok(text.trim().to_string())
    }
}

impl ModelEngine for WhisperEngine {
    /// `input` is a filesystem path to a `.wav`/`.mp3` file; the result is
    /// its transcript.
    fn run(&self, input: &str) -> Result<String, EngineError> {
        let samples = load_audio(Path::new(input))?;
        self.transcribe(&samples)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_model_returns_model_not_found() {
        let config = SpeechConfig::default();
        let result = WhisperEngine::load("/nonexistent/model.bin", &config);
        assert!(
            matches!(result, Err(EngineError::ModelNotFound(_))),
            "expected ModelNotFound, got: {result:?}"
        );
    }

    #[test]
    fn load_missing_model_error_mentions_the_path() {
        let config = SpeechConfig::default();
        let err = WhisperEngine::load("/nonexistent/model.bin", &config).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/model.bin"));
    }
}
