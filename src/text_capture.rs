//! Timeout-wrapped clipboard text capture.
//!
//! Clipboard reads can block (e.g. on X11 when the selection owner hangs). Reads
//! run in a short-lived thread with a timeout so the command returns even when
//! the system clipboard never answers.

use std::sync::mpsc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::system::{ClipboardError, ClipboardFormat, ClipboardProvider, SystemClipboard};

// --- Constants ---

/// Max time we wait for the system to return clipboard text before giving up.
pub const TEXT_CAPTURE_TIMEOUT_MS: u64 = 1200;

// --- Helpers ---

/// Runs `reader` on a worker thread and waits at most `timeout` for its answer.
pub fn read_with_timeout<T, F>(
    origin: &'static str,
    timeout: Duration,
    reader: F,
) -> Result<T, ClipboardError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ClipboardError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(reader());
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            let timeout_ms = timeout.as_millis() as u64;
            warn!(origin, timeout_ms, "Text capture timed out");
            Err(ClipboardError::Timeout { origin, timeout_ms })
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            warn!(origin, "Text capture worker disconnected");
            Err(ClipboardError::Disconnected)
        }
    }
}

/// Clipboard text. Runs with timeout.
pub fn read_clipboard_text() -> Result<Option<String>, ClipboardError> {
    read_with_timeout(
        "clipboard",
        Duration::from_millis(TEXT_CAPTURE_TIMEOUT_MS),
        || SystemClipboard::new()?.read_text(),
    )
}

/// PRIMARY selection text (Linux), or clipboard text elsewhere. Runs with timeout.
pub fn read_selection_text() -> Result<Option<String>, ClipboardError> {
    read_with_timeout(
        "selection",
        Duration::from_millis(TEXT_CAPTURE_TIMEOUT_MS),
        || SystemClipboard::new()?.read_primary_text(),
    )
}

/// Formats offered by the clipboard. Listing them reads the content, so it runs with timeout too.
pub fn read_clipboard_formats() -> Result<Vec<ClipboardFormat>, ClipboardError> {
    read_with_timeout(
        "clipboard formats",
        Duration::from_millis(TEXT_CAPTURE_TIMEOUT_MS),
        || SystemClipboard::new()?.available_formats(),
    )
}

/// Logs whether we got text or not; used after capture for diagnostics.
pub fn log_captured_text(result: &Option<String>) {
    match result {
        Some(text) => debug!(len = text.len(), "Captured text"),
        None => debug!("No text captured"),
    }
}

/// System clipboard whose reads go through the timeout wrapper.
/// Each call opens its own handle so a hung read cannot poison later ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimedClipboard {
    selection: bool,
}

impl TimedClipboard {
    pub fn clipboard() -> Self {
        Self { selection: false }
    }

    /// Reads come from the PRIMARY selection on Linux.
    pub fn selection() -> Self {
        Self { selection: true }
    }
}

impl ClipboardProvider for TimedClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        let text = if self.selection {
            read_selection_text()?
        } else {
            read_clipboard_text()?
        };
        log_captured_text(&text);
        Ok(text)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        SystemClipboard::new()?.write_text(text)
    }

    fn available_formats(&mut self) -> Result<Vec<ClipboardFormat>, ClipboardError> {
        read_clipboard_formats()
    }
}
