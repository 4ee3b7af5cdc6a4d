//! Copying colors and the short-lived "copied" indicator.

use crate::error::ClipboardError;

/// Token identifying one copy; a scheduled clear only applies to its own copy.
pub type Generation = u64;

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard via arboard, opened on first use.
///
/// The handle is kept alive afterwards: on X11 the copied text disappears
/// when its owner is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let cb = arboard::Clipboard::new()
                .map_err(|error| ClipboardError::Unavailable(error.to_string()))?;
            self.inner = Some(cb);
        }
        let Some(cb) = self.inner.as_mut() else {
            return Err(ClipboardError::Unavailable("no clipboard".into()));
        };
        cb.set_text(text.to_string())
            .map_err(|error| ClipboardError::Write(error.to_string()))
    }
}

#[derive(Debug)]
pub enum CopyOutcome {
    /// On the system clipboard.
    Copied(Generation),
    /// No clipboard; the caller must show the value so the user can copy it.
    Presented(Generation),
    Failed(ClipboardError),
}

#[derive(Debug)]
pub enum CopyAllOutcome {
    Copied,
    Presented(String),
    Failed(ClipboardError),
}

/// At most one value is marked as copied at a time.
#[derive(Debug, Default)]
pub struct CopyFeedback {
    copied: Option<String>,
    generation: Generation,
}

impl CopyFeedback {
    pub fn mark(&mut self, value: &str) -> Generation {
        self.generation += 1;
        self.copied = Some(value.to_string());
        self.generation
    }

    /// Clear the mark if `generation` is still the latest copy.
    pub fn expire(&mut self, generation: Generation) -> bool {
        if generation != self.generation || self.copied.is_none() {
            return false;
        }
        self.copied = None;
        true
    }

    pub fn current(&self) -> Option<&str> {
        self.copied.as_deref()
    }

    pub fn is_copied(&self, value: &str) -> bool {
        self.copied
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(value))
    }
}

pub struct ClipboardAdapter {
    sink: Box<dyn ClipboardSink>,
    feedback: CopyFeedback,
}

impl ClipboardAdapter {
    pub fn new(sink: Box<dyn ClipboardSink>) -> Self {
        Self {
            sink,
            feedback: CopyFeedback::default(),
        }
    }

    pub fn system() -> Self {
        Self::new(Box::new(SystemClipboard::default()))
    }

    pub fn feedback(&self) -> &CopyFeedback {
        &self.feedback
    }

    pub fn expire(&mut self, generation: Generation) -> bool {
        self.feedback.expire(generation)
    }

    /// Copy one color and mark it. Write errors leave the mark alone.
    pub fn copy_color(&mut self, value: &str) -> CopyOutcome {
        match self.sink.set_text(value) {
            Ok(()) => CopyOutcome::Copied(self.feedback.mark(value)),
            Err(ClipboardError::Unavailable(reason)) => {
                tracing::info!(%reason, "clipboard unavailable, presenting value");
                CopyOutcome::Presented(self.feedback.mark(value))
            }
            Err(e) => {
                tracing::warn!("copy failed: {e}");
                CopyOutcome::Failed(e)
            }
        }
    }

    /// Copy all colors as one `", "`-joined string. Does not touch the mark.
    pub fn copy_all(&mut self, values: &[String]) -> CopyAllOutcome {
        let text = values.join(", ");
        match self.sink.set_text(&text) {
            Ok(()) => CopyAllOutcome::Copied,
            Err(ClipboardError::Unavailable(_)) => CopyAllOutcome::Presented(text),
            Err(e) => {
                tracing::warn!("copy failed: {e}");
                CopyAllOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Mode {
        Works,
        Unavailable,
        Broken,
    }

    /// Clipboard double that records what was written.
    #[derive(Clone)]
    pub struct RecordingClipboard {
        pub mode: Mode,
        pub written: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingClipboard {
        pub fn new(mode: Mode) -> Self {
            Self {
                mode,
                written: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ClipboardSink for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            match self.mode {
                Mode::Works => {
                    self.written.lock().unwrap().push(text.to_string());
                    Ok(())
                }
                Mode::Unavailable => Err(ClipboardError::Unavailable("headless".into())),
                Mode::Broken => Err(ClipboardError::Write("denied".into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Mode, RecordingClipboard};
    use super::*;

    #[test]
    fn test_stale_generation_does_not_clear_newer_mark() {
        let mut fb = CopyFeedback::default();
        let first = fb.mark("#AABBCC");
        let second = fb.mark("#112233");
        assert!(!fb.expire(first));
        assert_eq!(fb.current(), Some("#112233"));
        assert!(fb.expire(second));
        assert_eq!(fb.current(), None);
        assert!(!fb.expire(second));
    }

    #[test]
    fn test_copy_color_marks() {
        let clip = RecordingClipboard::new(Mode::Works);
        let mut adapter = ClipboardAdapter::new(Box::new(clip.clone()));
        assert!(matches!(adapter.copy_color("#AABBCC"), CopyOutcome::Copied(_)));
        assert_eq!(*clip.written.lock().unwrap(), ["#AABBCC"]);
        assert!(adapter.feedback().is_copied("#aabbcc"));
    }

    #[test]
    fn test_copy_color_fallback_still_marks() {
        let mut adapter =
            ClipboardAdapter::new(Box::new(RecordingClipboard::new(Mode::Unavailable)));
        assert!(matches!(adapter.copy_color("#AABBCC"), CopyOutcome::Presented(_)));
        assert_eq!(adapter.feedback().current(), Some("#AABBCC"));
    }

    #[test]
    fn test_copy_color_write_error_does_not_mark() {
        let mut adapter = ClipboardAdapter::new(Box::new(RecordingClipboard::new(Mode::Broken)));
        assert!(matches!(
            adapter.copy_color("#AABBCC"),
            CopyOutcome::Failed(ClipboardError::Write(_))
        ));
        assert_eq!(adapter.feedback().current(), None);
    }

    #[test]
    fn test_copy_all_joins_and_leaves_mark() {
        let clip = RecordingClipboard::new(Mode::Works);
        let mut adapter = ClipboardAdapter::new(Box::new(clip.clone()));
        adapter.copy_color("#000000");

        let values = vec!["#AABBCC".to_string(), "#112233".to_string()];
        assert!(matches!(adapter.copy_all(&values), CopyAllOutcome::Copied));
        assert_eq!(clip.written.lock().unwrap()[1], "#AABBCC, #112233");
        assert_eq!(adapter.feedback().current(), Some("#000000"));
    }

    #[test]
    fn test_copy_all_fallback_returns_text() {
        let mut adapter =
            ClipboardAdapter::new(Box::new(RecordingClipboard::new(Mode::Unavailable)));
        let values = vec!["#AABBCC".to_string(), "#112233".to_string()];
        match adapter.copy_all(&values) {
            CopyAllOutcome::Presented(text) => assert_eq!(text, "#AABBCC, #112233"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
