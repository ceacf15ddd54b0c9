//! Injected dialog capabilities.
//!
//! The shell never talks to the windowing system's global dialog state
//! directly; it calls through two small traits so the whole shell can be
//! exercised in tests without a display:
//!
//! * [`Notifier`] — modal info/error message boxes.
//! * [`AudioFilePicker`] — the file-open dialog restricted to audio files.
//!
//! The production implementations ([`DialogNotifier`], [`NativeFilePicker`])
//! are thin `rfd` calls. The test doubles ([`RecordingNotifier`],
//! [`ScriptedPicker`]) record shown dialogs and return a scripted path.

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Modal message-box capability.
///
/// Both methods block until the user dismisses the dialog, matching the
/// synchronous event model of the rest of the shell.
pub trait Notifier: Send + Sync {
    /// Show an informational dialog.
    fn info(&self, title: &str, message: &str);
    /// Show an error dialog.
    fn error(&self, title: &str, message: &str);
}

/// Production notifier — native message boxes via `rfd`.
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn info(&self, title: &str, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .show();
    }

    fn error(&self, title: &str, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .show();
    }
}

// ---------------------------------------------------------------------------
// AudioFilePicker
// ---------------------------------------------------------------------------

/// File-open dialog capability, restricted to audio files.
pub trait AudioFilePicker: Send + Sync {
    /// Ask the user for an audio file. `None` means the dialog was
    /// cancelled.
    fn pick_audio_file(&self) -> Option<PathBuf>;
}

/// Production picker — the native file dialog filtered to `.wav`/`.mp3`.
pub struct NativeFilePicker;

impl AudioFilePicker for NativeFilePicker {
    fn pick_audio_file(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Audio Files", &["wav", "mp3"])
            .pick_file()
    }
}

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// One dialog shown through a [`RecordingNotifier`].
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Records every dialog instead of displaying it.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    shown: std::sync::Arc<std::sync::Mutex<Vec<Notification>>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded dialogs, in display order.
    pub fn shown(&self) -> std::sync::Arc<std::sync::Mutex<Vec<Notification>>> {
        std::sync::Arc::clone(&self.shown)
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn info(&self, title: &str, message: &str) {
        self.shown.lock().unwrap().push(Notification {
            level: NotificationLevel::Info,
            title: title.into(),
            message: message.into(),
        });
    }

    fn error(&self, title: &str, message: &str) {
        self.shown.lock().unwrap().push(Notification {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        });
    }
}

/// Returns a pre-scripted path (or cancellation) instead of opening a
/// dialog.
#[cfg(test)]
pub struct ScriptedPicker {
    path: Option<PathBuf>,
}

#[cfg(test)]
impl ScriptedPicker {
    /// Picker whose dialog "chooses" `path`.
    pub fn choosing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Picker whose dialog is always cancelled.
    pub fn cancelled() -> Self {
        Self { path: None }
    }
}

#[cfg(test)]
impl AudioFilePicker for ScriptedPicker {
    fn pick_audio_file(&self) -> Option<PathBuf> {
        self.path.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_dialogs_in_order() {
        let notifier = RecordingNotifier::new();
        let shown = notifier.shown();

        notifier.info("Models", "reloaded");
        notifier.error("Error", "boom");

        let shown = shown.lock().unwrap();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].level, NotificationLevel::Info);
        assert_eq!(shown[1].level, NotificationLevel::Error);
        assert_eq!(shown[1].message, "boom");
    }

    #[test]
    fn scripted_picker_returns_the_scripted_path() {
        let picker = ScriptedPicker::choosing("/tmp/clip.wav");
        assert_eq!(picker.pick_audio_file(), Some(PathBuf::from("/tmp/clip.wav")));
    }

    #[test]
    fn cancelled_picker_returns_none() {
        assert!(ScriptedPicker::cancelled().pick_audio_file().is_none());
    }

    /// Both capabilities must be usable behind trait objects.
    #[test]
    fn capabilities_are_object_safe() {
        let _: Box<dyn Notifier> = Box::new(RecordingNotifier::new());
        let _: Box<dyn AudioFilePicker> = Box::new(ScriptedPicker::cancelled());
    }
}
