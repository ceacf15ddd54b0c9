//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and cloned into the
//! engine factory.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// TextGenConfig
// ---------------------------------------------------------------------------

/// Settings for the text-generation engine.
///
/// The engine speaks the OpenAI chat-completions wire format, so any
/// compatible provider works: Ollama (OpenAI mode), OpenAI, Groq, LM Studio,
/// vLLM. All connection details live here; nothing is hardcoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextGenConfig {
    /// Base URL of the API endpoint.
    ///
    /// - Ollama default: `http://localhost:11434`
    /// - OpenAI: `https://api.openai.com`
    pub base_url: String,
    /// API key — `None` for local providers that need no authentication.
    pub api_key: Option<String>,
    /// Model identifier sent to the API (e.g. `"qwen2.5:3b"`, `"gpt-4o-mini"`).
    pub model: String,
    /// Hard cap on the generated output length, in tokens. Exactly one
    /// candidate sequence is requested per run.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 1.0). Lower = more deterministic.
    pub temperature: f32,
    /// Maximum seconds to wait for a response before timing out.
    pub timeout_secs: u64,
}

impl Default for TextGenConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            api_key: None,
            model: "qwen2.5:3b".into(),
            max_tokens: 40,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for the Whisper speech-to-text engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// GGML model name / file stem (e.g. `"ggml-small"`). Resolved to
    /// `<models_dir>/<model>.bin` by the engine factory.
    pub model: String,
    /// Speech language as an ISO-639-1 code, or `"auto"` for Whisper's
    /// built-in language detection.
    pub language: String,
    /// Number of CPU threads handed to the inference pass.
    pub threads: i32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            model: "ggml-small".into(),
            language: "en".into(),
            threads: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Initial window width in logical pixels.
    pub window_width: f32,
    /// Initial window height in logical pixels.
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 850.0,
            window_height: 650.0,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use model_desk::config::AppConfig;
///
/// // Load (returns Default when the file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Text-generation engine settings.
    pub textgen: TextGenConfig,
    /// Speech-to-text engine settings.
    pub speech: SpeechConfig,
    /// Window geometry.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// A default `AppConfig` must survive a TOML round trip without data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        // TextGenConfig
        assert_eq!(original.textgen.base_url, loaded.textgen.base_url);
        assert_eq!(original.textgen.api_key, loaded.textgen.api_key);
        assert_eq!(original.textgen.model, loaded.textgen.model);
        assert_eq!(original.textgen.max_tokens, loaded.textgen.max_tokens);
        assert_eq!(original.textgen.timeout_secs, loaded.textgen.timeout_secs);

        // SpeechConfig
        assert_eq!(original.speech.model, loaded.speech.model);
        assert_eq!(original.speech.language, loaded.speech.language);
        assert_eq!(original.speech.threads, loaded.speech.threads);

        // UiConfig
        assert_eq!(original.ui.window_width, loaded.ui.window_width);
        assert_eq!(original.ui.window_height, loaded.ui.window_height);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.textgen.model, default.textgen.model);
        assert_eq!(config.speech.model, default.speech.model);
        assert_eq!(config.ui.window_width, default.ui.window_width);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.textgen.base_url, "http://localhost:11434");
        assert_eq!(cfg.textgen.model, "qwen2.5:3b");
        assert_eq!(cfg.textgen.max_tokens, 40);
        assert!(cfg.textgen.api_key.is_none());
        assert_eq!(cfg.speech.model, "ggml-small");
        assert_eq!(cfg.speech.language, "en");
        assert_eq!(cfg.ui.window_width, 850.0);
        assert_eq!(cfg.ui.window_height, 650.0);
    }

    /// Modified non-default values must survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.textgen.base_url = "https://api.openai.com".into();
        cfg.textgen.api_key = Some("sk-test".into());
        cfg.textgen.model = "gpt-4o-mini".into();
        cfg.textgen.max_tokens = 128;
        cfg.speech.model = "ggml-medium".into();
        cfg.speech.language = "auto".into();
        cfg.ui.window_width = 1024.0;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.textgen.base_url, "https://api.openai.com");
        assert_eq!(loaded.textgen.api_key, Some("sk-test".into()));
        assert_eq!(loaded.textgen.model, "gpt-4o-mini");
        assert_eq!(loaded.textgen.max_tokens, 128);
        assert_eq!(loaded.speech.model, "ggml-medium");
        assert_eq!(loaded.speech.language, "auto");
        assert_eq!(loaded.ui.window_width, 1024.0);
    }
}
