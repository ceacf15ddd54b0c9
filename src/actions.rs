//! Action wrappers composed around every button and menu handler.
//!
//! Two wrappers, composed at the call site with logging outermost:
//!
//! ```text
//! logged("run_model_1", || guarded(notifier, || real_handler()))
//! ```
//!
//! [`logged`] emits the trace line before invoking the inner closure, so the
//! trace fires even when the action ultimately fails. [`guarded`] converts
//! any error from the inner closure into a modal error dialog and swallows
//! it — no error ever reaches the UI event loop.

use crate::notify::Notifier;

// ---------------------------------------------------------------------------
// logged
// ---------------------------------------------------------------------------

/// Emit a trace line naming the action, then invoke it.
///
/// The return value, arguments, and error behaviour of `action` are passed
/// through unchanged — this wrapper is purely observational.
pub fn logged<R>(name: &str, action: impl FnOnce() -> R) -> R {
    log::info!("action `{name}` invoked");
    action()
}

// ---------------------------------------------------------------------------
// guarded
// ---------------------------------------------------------------------------

/// Run a fallible action; on error, show a modal dialog instead of
/// propagating.
///
/// The error's display text is shown verbatim. The action's return value is
/// lost on failure — the caller observes "no result", exactly as if the
/// handler had been a no-op.
pub fn guarded<E: std::fmt::Display>(
    notifier: &dyn Notifier,
    action: impl FnOnce() -> Result<(), E>,
) {
    if let Err(err) = action() {
        notifier.error("Error", &err.to_string());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotificationLevel, RecordingNotifier};

    // ---- logged ------------------------------------------------------------

    #[test]
    fn logged_passes_the_return_value_through() {
        assert_eq!(logged("compute", || 41 + 1), 42);
    }

    #[test]
    fn logged_invokes_the_action_exactly_once() {
        let mut count = 0;
        logged("count", || count += 1);
        assert_eq!(count, 1);
    }

    // ---- guarded -----------------------------------------------------------

    #[test]
    fn guarded_ok_shows_no_dialog() {
        let notifier = RecordingNotifier::new();
        let shown = notifier.shown();

        guarded(&notifier, || Ok::<(), String>(()));

        assert!(shown.lock().unwrap().is_empty());
    }

    #[test]
    fn guarded_err_shows_exactly_one_error_dialog() {
        let notifier = RecordingNotifier::new();
        let shown = notifier.shown();

        guarded(&notifier, || Err("something broke"));

        let shown = shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].level, NotificationLevel::Error);
        assert_eq!(shown[0].title, "Error");
        assert_eq!(shown[0].message, "something broke");
    }

    // ---- composition -------------------------------------------------------

    /// With logging outermost, a failing inner action still produces its
    /// dialog, and the wrapper composition returns normally.
    #[test]
    fn logged_around_guarded_swallows_the_error() {
        let notifier = RecordingNotifier::new();
        let shown = notifier.shown();

        logged("failing_action", || {
            guarded(&notifier, || Err("inner failure"))
        });

        assert_eq!(shown.lock().unwrap().len(), 1);
    }
}
