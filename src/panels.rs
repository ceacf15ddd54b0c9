//! Static information panels shown below the input/output row.
//!
//! Each panel is plain composition: a struct that builds its display text
//! once at construction and paints it into a read-only scrollable text area.
//! Nothing here is interactive.

use egui::RichText;

use crate::config::AppConfig;

/// Height of the scrollable text area inside each panel.
const PANEL_TEXT_HEIGHT: f32 = 110.0;

// ---------------------------------------------------------------------------
// ModelInfoPanel
// ---------------------------------------------------------------------------

/// Describes the two configured models, with reference links.
pub struct ModelInfoPanel {
    text: String,
}

impl ModelInfoPanel {
    /// Build the panel text from the loaded configuration.
    pub fn new(config: &AppConfig) -> Self {
        let text = format!(
            "{model}\n\
             - Category: Text Generation\n\
             - Served by an OpenAI-compatible chat endpoint\n\
             - Output capped at {max_tokens} tokens, one candidate per run\n\
             \n\
             {speech}\n\
             - Category: Automatic Speech Recognition\n\
             - Whisper GGML model run locally via whisper.cpp\n\
             \n\
             References:\n\
             - https://github.com/ggerganov/whisper.cpp\n\
             - https://huggingface.co/openai/whisper-small\n",
            model = config.textgen.model,
            max_tokens = config.textgen.max_tokens,
            speech = config.speech.model,
        );
        Self { text }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        show_text_panel(ui, "Selected model info", "model_info_panel", &self.text);
    }
}

// ---------------------------------------------------------------------------
// DesignNotesPanel
// ---------------------------------------------------------------------------

/// Fixed notes on how the application itself is put together.
pub struct DesignNotesPanel {
    text: String,
}

impl DesignNotesPanel {
    pub fn new() -> Self {
        let text = "\
- Engines: both pipelines implement one object-safe `run` contract,\n\
  selected by the current input mode.\n\
- Composition: panels own their widgets outright; no inheritance.\n\
- Wrappers: every fallible handler runs inside a trace log and an\n\
  error boundary, so failures become dialogs, never crashes.\n\
- Capabilities: message boxes and the file picker sit behind injected\n\
  traits, so the shell runs headless under test.\n"
            .to_string();
        Self { text }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        show_text_panel(ui, "How this app is built", "design_notes_panel", &self.text);
    }
}

impl Default for DesignNotesPanel {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Shared rendering
// ---------------------------------------------------------------------------

/// A titled group containing a read-only scrollable text area.
fn show_text_panel(ui: &mut egui::Ui, title: &str, id_salt: &str, text: &str) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(title).strong());
        egui::ScrollArea::vertical()
            .id_salt(id_salt)
            .max_height(PANEL_TEXT_HEIGHT)
            .show(ui, |ui| {
                // An immutable &str buffer renders as a read-only text area.
                let mut text_ref = text;
                ui.add(egui::TextEdit::multiline(&mut text_ref).desired_width(f32::INFINITY));
            });
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_info_mentions_both_configured_models() {
        let mut config = AppConfig::default();
        config.textgen.model = "my-text-model".into();
        config.speech.model = "my-speech-model".into();

        let panel = ModelInfoPanel::new(&config);
        assert!(panel.text.contains("my-text-model"));
        assert!(panel.text.contains("my-speech-model"));
    }

    #[test]
    fn model_info_mentions_the_output_cap() {
        let mut config = AppConfig::default();
        config.textgen.max_tokens = 77;
        let panel = ModelInfoPanel::new(&config);
        assert!(panel.text.contains("77 tokens"));
    }

    #[test]
    fn design_notes_are_non_empty_and_fixed() {
        let a = DesignNotesPanel::new();
        let b = DesignNotesPanel::new();
        assert!(!a.text.is_empty());
        assert_eq!(a.text, b.text);
    }
}
