//! Linux-specific clipboard implementation

use std::time::{Duration, Instant};

use arboard::{Clipboard, GetExtLinux, LinuxClipboardKind, SetExtLinux};
use tracing::{debug, info};

use super::{text_or_none, ClipboardError};

/// How long a write keeps serving the clipboard so a clipboard manager can take over
/// before this process exits. X11 and Wayland drop the content with its owner.
const CLIPBOARD_HOLD_MS: u64 = 1500;

/// Reads the PRIMARY selection (selected text), without falling back to the clipboard.
pub(super) fn read_primary_text(clipboard: &mut Clipboard) -> Result<Option<String>, ClipboardError> {
    info!("Attempting to read PRIMARY selection");

    let text = text_or_none(
        clipboard
            .get()
            .clipboard(LinuxClipboardKind::Primary)
            .text(),
    )?;
    if text.is_none() {
        debug!("PRIMARY selection is empty");
    }
    Ok(text)
}

pub(super) fn set_text(clipboard: &mut Clipboard, text: &str) -> Result<(), ClipboardError> {
    let deadline = Instant::now() + Duration::from_millis(CLIPBOARD_HOLD_MS);
    clipboard.set().wait_until(deadline).text(text)?;
    debug!(hold_ms = CLIPBOARD_HOLD_MS, "Clipboard ownership released");
    Ok(())
}
