//! Configuration module for Model Desk.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each engine,
//! `AppPaths` for cross-platform data directories, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, SpeechConfig, TextGenConfig, UiConfig};
