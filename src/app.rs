//! Model Desk application shell — egui/eframe.
//!
//! # Architecture
//!
//! [`DeskApp`] is the top-level [`eframe::App`]. It owns the two boxed
//! inference engines, the factory that rebuilds them on reload, the injected
//! dialog capabilities, and all transient UI state (input mode, audio path,
//! input/output buffers). Every handler runs to completion synchronously on
//! the UI thread — a long inference call blocks the window for its full
//! duration.
//!
//! # Layout
//!
//! ```text
//! ┌ File │ Models │ Help ──────────────────────────────────────┐
//! │ Model selection: [combo]  [Load model]                     │
//! ├───────────────────────────┬────────────────────────────────┤
//! │ User input                │ Model output                   │
//! │  (•) Text  ( ) Audio      │  Output display:               │
//! │  [Browse…]  (Audio only)  │  ┌──────────────────────────┐  │
//! │  ┌─────────────────────┐  │  │ …result…                 │  │
//! │  │ …typed text…        │  │  └──────────────────────────┘  │
//! │  └─────────────────────┘  │                                │
//! │  [Run model 1][Run model 2][Clear]                         │
//! ├───────────────────────────┴────────────────────────────────┤
//! │ Selected model info       │ How this app is built          │
//! ├────────────────────────────────────────────────────────────┤
//! │ Notes / references                                         │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Handler wrapping
//!
//! Fallible handlers (Run, Reload) are composed as
//! `logged(name, || guarded(notifier, || handler()))` — trace line first,
//! then the error boundary, then the real work. Browse and Clear cannot
//! fail and carry only the trace wrapper, matching their behaviour of
//! leaving state untouched on cancellation.

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;
use thiserror::Error;

use crate::actions;
use crate::config::AppConfig;
use crate::model::{EngineFactory, EngineKind, ModelEngine};
use crate::notify::{AudioFilePicker, Notifier};
use crate::panels::{DesignNotesPanel, ModelInfoPanel};

/// Prompt substituted when the input box is empty or whitespace-only.
const DEFAULT_PROMPT: &str = "Hello world";

/// Fixed text of the notes/references strip at the bottom of the window.
const REFERENCES: &str = "References:\n\
- Radford et al. (2019) \"Language Models are Unsupervised Multitask Learners\" (GPT-2)\n\
- Radford et al. (2022) \"Robust Speech Recognition via Large-Scale Weak Supervision\" (Whisper)\n\
- whisper.cpp GGML runtime: https://github.com/ggerganov/whisper.cpp\n\
- OpenAI chat-completions wire format: https://platform.openai.com/docs/api-reference/chat\n";

// ---------------------------------------------------------------------------
// InputMode
// ---------------------------------------------------------------------------

/// The currently selected input kind. Governs which input widget is shown
/// and which engine Run invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typed text → text-generation engine.
    Text,
    /// Browsed audio file → speech-to-text engine.
    Audio,
}

impl InputMode {
    /// Label of the pipeline this mode dispatches to.
    pub fn pipeline_label(&self) -> &'static str {
        match self {
            InputMode::Text => "Text Generation",
            InputMode::Audio => "Speech-to-Text",
        }
    }
}

// ---------------------------------------------------------------------------
// ShellError
// ---------------------------------------------------------------------------

/// Errors raised inside Run/Reload handlers, caught by the error boundary.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Audio mode was run without a selected file.
    #[error("Please browse for an audio file.")]
    NoAudioFile,

    /// The engine (or its reconstruction) failed; shown verbatim.
    #[error(transparent)]
    Engine(#[from] crate::model::EngineError),
}

// ---------------------------------------------------------------------------
// DeskApp
// ---------------------------------------------------------------------------

/// eframe application — the Model Desk window.
pub struct DeskApp {
    // ── Engines ──────────────────────────────────────────────────────────
    /// Text-generation engine; replaced wholesale on reload.
    text_engine: Box<dyn ModelEngine>,
    /// Speech-to-text engine; replaced wholesale on reload.
    speech_engine: Box<dyn ModelEngine>,
    /// Builds fresh engines for Reload Models.
    factory: Box<dyn EngineFactory>,

    // ── Capabilities ─────────────────────────────────────────────────────
    /// Modal dialogs (info + error boundary target).
    notifier: Arc<dyn Notifier>,
    /// Audio file-open dialog.
    picker: Arc<dyn AudioFilePicker>,

    // ── UI state ─────────────────────────────────────────────────────────
    /// Selected input kind.
    mode: InputMode,
    /// Path chosen via Browse; required for an Audio run.
    audio_path: Option<PathBuf>,
    /// Contents of the input text area.
    input_text: String,
    /// Contents of the output text area.
    output_text: String,

    // ── Static panels ────────────────────────────────────────────────────
    model_info: ModelInfoPanel,
    design_notes: DesignNotesPanel,
}

impl DeskApp {
    /// Create a new [`DeskApp`] from pre-built engines and capabilities.
    ///
    /// The engines are built by the caller (normally through the same
    /// `factory` passed here) so startup can substitute a stub when model
    /// construction fails without losing the reload path.
    pub fn new(
        text_engine: Box<dyn ModelEngine>,
        speech_engine: Box<dyn ModelEngine>,
        factory: Box<dyn EngineFactory>,
        notifier: Arc<dyn Notifier>,
        picker: Arc<dyn AudioFilePicker>,
        config: &AppConfig,
    ) -> Self {
        Self {
            text_engine,
            speech_engine,
            factory,
            notifier,
            picker,
            mode: InputMode::Text,
            audio_path: None,
            input_text: String::new(),
            output_text: String::new(),
            model_info: ModelInfoPanel::new(config),
            design_notes: DesignNotesPanel::new(),
        }
    }

    // ── Handlers ─────────────────────────────────────────────────────────

    /// Mode just changed. Switching to Text discards any typed or selected
    /// input; switching to Audio keeps the buffer as-is.
    fn on_mode_changed(&mut self) {
        if self.mode == InputMode::Text {
            self.input_text.clear();
            self.audio_path = None;
        }
    }

    /// Browse for an audio file. Cancellation leaves prior state unchanged.
    fn handle_browse(&mut self) {
        actions::logged("browse_audio", || {
            if let Some(path) = self.picker.pick_audio_file() {
                self.input_text = format!("[Audio file selected: {}]", path.display());
                self.audio_path = Some(path);
            }
        });
    }

    /// One of the two equivalent Run buttons. Both take the same branch
    /// logic; they differ only in the action name they are traced under.
    fn handle_run(&mut self, action_name: &'static str) {
        let notifier = Arc::clone(&self.notifier);
        actions::logged(action_name, || {
            actions::guarded(notifier.as_ref(), || self.run_model())
        });
    }

    /// The shared Run branch logic.
    fn run_model(&mut self) -> Result<(), ShellError> {
        self.output_text.clear();

        let result = match self.mode {
            InputMode::Text => {
                let trimmed = self.input_text.trim();
                let prompt = if trimmed.is_empty() {
                    DEFAULT_PROMPT
                } else {
                    trimmed
                };
                self.text_engine.run(prompt)?
            }
            InputMode::Audio => {
                let path = self.audio_path.as_ref().ok_or(ShellError::NoAudioFile)?;
                self.speech_engine.run(&path.to_string_lossy())?
            }
        };

        self.output_text = result;
        Ok(())
    }

    /// Empty both text areas and discard the stored audio path.
    fn handle_clear(&mut self) {
        actions::logged("clear_all", || {
            self.input_text.clear();
            self.output_text.clear();
            self.audio_path = None;
        });
    }

    /// Rebuild both engines through the factory.
    fn handle_reload(&mut self) {
        let notifier = Arc::clone(&self.notifier);
        actions::logged("reload_models", || {
            actions::guarded(notifier.as_ref(), || self.reload_models())
        });
    }

    fn reload_models(&mut self) -> Result<(), ShellError> {
        // Build both replacements before touching either slot, so a failed
        // build leaves the previous engines fully in place.
        let text = self.factory.build(EngineKind::TextGen)?;
        let speech = self.factory.build(EngineKind::SpeechToText)?;
        self.text_engine = text;
        self.speech_engine = speech;
        self.notifier.info("Models", "Models reloaded successfully.");
        Ok(())
    }

    fn handle_about(&self) {
        self.notifier.info(
            "About",
            "Model Desk — a desktop front-end for two inference pipelines: \
             text generation and speech-to-text.",
        );
    }

    // ── Drawing ──────────────────────────────────────────────────────────

    fn draw_menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Exit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close_menu();
                }
            });
            ui.menu_button("Models", |ui| {
                if ui.button("Reload models").clicked() {
                    self.handle_reload();
                    ui.close_menu();
                }
            });
            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    self.handle_about();
                    ui.close_menu();
                }
            });
        });
    }

    /// Top row: pipeline selector + reload shortcut.
    fn draw_top_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Model selection:");

            let mut changed = false;
            egui::ComboBox::from_id_salt("pipeline_choice")
                .selected_text(self.mode.pipeline_label())
                .width(180.0)
                .show_ui(ui, |ui| {
                    changed |= ui
                        .selectable_value(&mut self.mode, InputMode::Text, "Text Generation")
                        .changed();
                    changed |= ui
                        .selectable_value(&mut self.mode, InputMode::Audio, "Speech-to-Text")
                        .changed();
                });
            if changed {
                self.on_mode_changed();
            }

            if ui.button("Load model").clicked() {
                self.handle_reload();
            }
        });
    }

    fn draw_input_panel(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("User input").strong());

            let mut changed = false;
            changed |= ui
                .radio_value(&mut self.mode, InputMode::Text, "Text")
                .changed();
            changed |= ui
                .radio_value(&mut self.mode, InputMode::Audio, "Audio")
                .changed();
            if changed {
                self.on_mode_changed();
            }

            if self.mode == InputMode::Audio && ui.button("Browse…").clicked() {
                self.handle_browse();
            }

            egui::ScrollArea::vertical()
                .id_salt("input_scroll")
                .max_height(140.0)
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut self.input_text)
                            .desired_rows(6)
                            .desired_width(f32::INFINITY),
                    );
                });

            ui.horizontal(|ui| {
                if ui.button("Run model 1").clicked() {
                    self.handle_run("run_model_1");
                }
                if ui.button("Run model 2").clicked() {
                    self.handle_run("run_model_2");
                }
                if ui.button("Clear").clicked() {
                    self.handle_clear();
                }
            });
        });
    }

    fn draw_output_panel(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("Model output").strong());
            ui.label("Output display:");

            egui::ScrollArea::vertical()
                .id_salt("output_scroll")
                .max_height(200.0)
                .show(ui, |ui| {
                    // Immutable &str buffer → read-only text area.
                    let mut output = self.output_text.as_str();
                    ui.add(
                        egui::TextEdit::multiline(&mut output)
                            .desired_rows(8)
                            .desired_width(f32::INFINITY),
                    );
                });
        });
    }

    fn draw_notes_row(&self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("Notes / references").strong());
            let mut notes = REFERENCES;
            ui.add(egui::TextEdit::multiline(&mut notes).desired_width(f32::INFINITY));
        });
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for DeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.draw_menu_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_top_row(ui);
            ui.separator();

            ui.columns(2, |columns| {
                self.draw_input_panel(&mut columns[0]);
                self.draw_output_panel(&mut columns[1]);
            });

            ui.add_space(6.0);
            ui.columns(2, |columns| {
                self.model_info.show(&mut columns[0]);
                self.design_notes.show(&mut columns[1]);
            });

            ui.add_space(6.0);
            self.draw_notes_row(ui);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("Model Desk closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
