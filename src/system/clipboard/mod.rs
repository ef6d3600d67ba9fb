//! Clipboard reading and writing.
//!
//! [`ClipboardProvider`] is the seam the actions layer talks to. [`SystemClipboard`]
//! implements it over `arboard`; tests use an in-memory clipboard instead.

#[cfg(target_os = "linux")]
mod linux;

use std::fmt;

use arboard::Clipboard;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),
    #[error("Reading {origin} timed out after {timeout_ms} ms")]
    Timeout {
        origin: &'static str,
        timeout_ms: u64,
    },
    #[error("Clipboard worker disconnected")]
    Disconnected,
}

/// Kind of content currently offered by the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClipboardFormat {
    #[serde(rename = "text/plain")]
    Text,
    #[serde(rename = "image")]
    Image,
}

impl ClipboardFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for ClipboardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read/write access to a clipboard.
pub trait ClipboardProvider {
    /// Current clipboard text. `None` when the clipboard holds no (or empty) text.
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError>;

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    fn available_formats(&mut self) -> Result<Vec<ClipboardFormat>, ClipboardError>;
}

/// Maps "no text on the clipboard" to `None` and keeps real failures as errors.
fn text_or_none(result: Result<String, arboard::Error>) -> Result<Option<String>, ClipboardError> {
    match result {
        Ok(text) if text.is_empty() => Ok(None),
        Ok(text) => Ok(Some(text)),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The desktop clipboard.
pub struct SystemClipboard {
    inner: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = Clipboard::new()?;
        Ok(Self { inner })
    }

    /// Reads the PRIMARY selection (last selected text) on Linux.
    /// Other platforms have no such selection and read the regular clipboard.
    pub fn read_primary_text(&mut self) -> Result<Option<String>, ClipboardError> {
        #[cfg(target_os = "linux")]
        {
            linux::read_primary_text(&mut self.inner)
        }

        #[cfg(not(target_os = "linux"))]
        {
            debug!("PRIMARY selection not available on this platform, reading clipboard");
            self.read_text()
        }
    }
}

impl ClipboardProvider for SystemClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        let text = text_or_none(self.inner.get_text())?;
        match &text {
            // Only the length is logged; clipboard contents may be secrets.
            Some(text) => debug!(len = text.len(), "Read clipboard text"),
            None => debug!("Clipboard holds no text"),
        }
        Ok(text)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        #[cfg(target_os = "linux")]
        {
            linux::set_text(&mut self.inner, text)?;
        }

        #[cfg(not(target_os = "linux"))]
        {
            self.inner.set_text(text)?;
        }

        debug!(len = text.len(), "Wrote clipboard text");
        Ok(())
    }

    fn available_formats(&mut self) -> Result<Vec<ClipboardFormat>, ClipboardError> {
        let mut formats = Vec::new();
        if text_or_none(self.inner.get_text())?.is_some() {
            formats.push(ClipboardFormat::Text);
        }
        match self.inner.get_image() {
            Ok(_) => formats.push(ClipboardFormat::Image),
            Err(arboard::Error::ContentNotAvailable) => {}
            Err(e) => debug!(error = %e, "Image read failed"),
        }
        debug!(?formats, "Clipboard formats");
        Ok(formats)
    }
}

/// In-memory clipboard for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryClipboard {
    pub text: Option<String>,
    pub fail: bool,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            fail: true,
        }
    }

    fn check(&self) -> Result<(), ClipboardError> {
        if self.fail {
            Err(ClipboardError::Unavailable(arboard::Error::ClipboardOccupied))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
impl ClipboardProvider for MemoryClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        self.check()?;
        Ok(self.text.clone().filter(|t| !t.is_empty()))
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.check()?;
        self.text = Some(text.to_string());
        Ok(())
    }

    fn available_formats(&mut self) -> Result<Vec<ClipboardFormat>, ClipboardError> {
        self.check()?;
        Ok(match self.text.as_deref() {
            Some(t) if !t.is_empty() => vec![ClipboardFormat::Text],
            _ => Vec::new(),
        })
    }
}
