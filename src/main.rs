//! Application entry point — Model Desk.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build the engine factory and construct both engines eagerly — the
//!    Whisper GGML load can take seconds and can fail. A construction
//!    failure is logged and the slot gets a stub engine that reports the
//!    error on first Run, so the window always opens.
//! 4. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use model_desk::{
    app::DeskApp,
    config::AppConfig,
    model::{ConfigFactory, EngineError, EngineFactory, EngineKind, ModelEngine},
    notify::{DialogNotifier, NativeFilePicker},
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Engine construction with degrade-to-stub fallback
// ---------------------------------------------------------------------------

/// Build an engine through the factory, substituting an [`UnavailableEngine`]
/// when construction fails. The application still launches; the failure
/// resurfaces as an error dialog the first time the engine is run.
fn build_or_stub(factory: &ConfigFactory, kind: EngineKind) -> Box<dyn ModelEngine> {
    match factory.build(kind) {
        Ok(engine) => {
            log::info!("{} engine ready", kind.label());
            engine
        }
        Err(e) => {
            log::warn!(
                "could not build {} engine ({e}); it will report the error on use",
                kind.label()
            );
            Box::new(UnavailableEngine { error: e })
        }
    }
}

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let vp = egui::ViewportBuilder::default()
        .with_inner_size([config.ui.window_width, config.ui.window_height])
        .with_min_inner_size([640.0, 480.0]);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Model Desk starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Engines (eager construction, stub on failure)
    let factory = ConfigFactory::new(config.clone());
    let text_engine = build_or_stub(&factory, EngineKind::TextGen);
    let speech_engine = build_or_stub(&factory, EngineKind::SpeechToText);

    let app = DeskApp::new(
        text_engine,
        speech_engine,
        Box::new(factory),
        Arc::new(DialogNotifier),
        Arc::new(NativeFilePicker),
        &config,
    );

    // 4. Run the window (blocks until close)
    let options = native_options(&config);
    eframe::run_native("Model Desk", options, Box::new(move |_cc| Ok(Box::new(app))))
}

// ---------------------------------------------------------------------------
// UnavailableEngine — fallback when construction fails at startup
// ---------------------------------------------------------------------------

/// Stands in for an engine whose construction failed; every `run` returns
/// the original construction error.
struct UnavailableEngine {
    error: EngineError,
}

impl ModelEngine for UnavailableEngine {
    fn run(&self, _input: &str) -> Result<String, EngineError> {
        Err(self.error.clone())
    }
}
