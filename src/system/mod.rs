//! System interactions (clipboard)

mod clipboard;

#[cfg(test)]
pub(crate) use clipboard::MemoryClipboard;
pub use clipboard::{ClipboardError, ClipboardFormat, ClipboardProvider, SystemClipboard};
