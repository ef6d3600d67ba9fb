//! Error type returned by the command-line front end.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::system::ClipboardError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// An action finished with a failure status (e.g. the clipboard could not be read).
    #[error("{0}")]
    Action(String),
}
