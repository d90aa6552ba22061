//! Display surface the controller renders into

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

/// The visual element the panel text is attached to
///
/// Implemented by the host. The controller only ever sets text and toggles
/// the error indicator; layout and styling beyond that belong to the host.
///
/// Both methods are called from the controller's task. They may read the
/// controller's status but must not call `UpdateController::shutdown`.
pub trait DisplaySurface: Send + Sync {
    /// Replaces the displayed text
    fn set_text(&self, text: &str);

    /// Turns the error indicator on or off
    fn set_error_style(&self, on: bool);
}

/// Renders the panel as a single rewritten line on stdout
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    error: AtomicBool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySurface for TerminalDisplay {
    fn set_text(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // Clear the line, then print in red while the error style is on
        let _ = if self.error.load(Ordering::Relaxed) {
            write!(out, "\r\x1b[2K\x1b[31m{}\x1b[0m", text)
        } else {
            write!(out, "\r\x1b[2K{}", text)
        };
        let _ = out.flush();
    }

    fn set_error_style(&self, on: bool) {
        self.error.store(on, Ordering::Relaxed);
    }
}

#[cfg(test)]
pub mod recording {
    use super::*;
    use std::sync::Mutex;

    /// Display that remembers everything pushed to it
    #[derive(Debug, Default)]
    pub struct RecordingDisplay {
        texts: Mutex<Vec<String>>,
        error: AtomicBool,
    }

    impl RecordingDisplay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn texts(&self) -> Vec<String> {
            self.texts.lock().unwrap().clone()
        }

        pub fn last_text(&self) -> Option<String> {
            self.texts.lock().unwrap().last().cloned()
        }

        pub fn push_count(&self) -> usize {
            self.texts.lock().unwrap().len()
        }

        pub fn error_style(&self) -> bool {
            self.error.load(Ordering::SeqCst)
        }
    }

    impl DisplaySurface for RecordingDisplay {
        fn set_text(&self, text: &str) {
            self.texts.lock().unwrap().push(text.to_string());
        }

        fn set_error_style(&self, on: bool) {
            self.error.store(on, Ordering::SeqCst);
        }
    }
}
