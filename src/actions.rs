//! User-triggered actions: paste from clipboard, clean typed input, copy results, clear.
//!
//! State is explicit. Each call to [`execute_action`] takes the current [`SessionState`]
//! and returns the next one, so a front end only has to hold on to the value between
//! interactions. Clipboard access goes through [`ClipboardProvider`]; failures there end
//! up as a status message, never as an error from this module.

use tracing::{debug, warn};

use crate::cleaner::{clean_text, describe_cleaning, CleaningOptions, CleaningResult};
use crate::system::ClipboardProvider;

// --- Status messages ---

pub const STATUS_READY: &str = "Ready to clean text";
pub const STATUS_PASTED: &str = "Text pasted from clipboard";
pub const STATUS_CLIPBOARD_EMPTY: &str = "Clipboard is empty";
pub const STATUS_READ_ERROR: &str = "Error reading from clipboard";
pub const STATUS_COPIED_CLEANED: &str = "Cleaned text copied to clipboard";
pub const STATUS_COPIED_ORIGINAL: &str = "Original text copied to clipboard";
pub const STATUS_COPY_ERROR: &str = "Error copying to clipboard";

// --- Toggles and state ---

/// The two whitespace switches a user sees. Removal flags stay on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiToggles {
    pub preserve_whitespace: bool,
    pub remove_line_breaks: bool,
}

impl Default for UiToggles {
    fn default() -> Self {
        Self {
            preserve_whitespace: true,
            remove_line_breaks: false,
        }
    }
}

impl UiToggles {
    /// Asking for line breaks to go wins over preserving whitespace.
    pub fn to_options(self) -> CleaningOptions {
        CleaningOptions {
            preserve_whitespace: self.preserve_whitespace && !self.remove_line_breaks,
            ..CleaningOptions::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub original_text: String,
    pub last_result: Option<CleaningResult>,
    pub status: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            original_text: String::new(),
            last_result: None,
            status: STATUS_READY.to_string(),
        }
    }
}

impl SessionState {
    pub fn cleaned_text(&self) -> Option<&str> {
        self.last_result
            .as_ref()
            .map(|result| result.cleaned_text.as_str())
    }

    pub fn can_copy_cleaned(&self) -> bool {
        self.cleaned_text().is_some_and(|text| !text.is_empty())
    }

    pub fn can_copy_original(&self) -> bool {
        !self.original_text.is_empty()
    }

    fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }
}

/// Action a front end can request.
#[derive(Clone, PartialEq, Eq)]
pub enum AppAction {
    Paste,
    Input(String),
    CopyCleaned,
    CopyOriginal,
    Clear,
}

impl AppAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Paste => "paste",
            Self::Input(_) => "input",
            Self::CopyCleaned => "copy-cleaned",
            Self::CopyOriginal => "copy-original",
            Self::Clear => "clear",
        }
    }
}

// Input text is left out so clipboard contents never reach the logs.
impl std::fmt::Debug for AppAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(text) => write!(f, "Input(len={})", text.len()),
            other => f.write_str(other.name()),
        }
    }
}

/// Parses an action name. `input` needs a payload and is not accepted here.
pub fn parse_app_action(raw: &str) -> Option<AppAction> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "paste" => Some(AppAction::Paste),
        "copy-cleaned" | "copy" => Some(AppAction::CopyCleaned),
        "copy-original" => Some(AppAction::CopyOriginal),
        "clear" => Some(AppAction::Clear),
        _ => None,
    }
}

// --- Execution ---

/// Cleans `text` and stores it as the session's original text.
/// Blank input clears the previous result instead.
fn process_text(mut state: SessionState, text: String, options: &CleaningOptions) -> SessionState {
    state.original_text = text;

    if state.original_text.trim().is_empty() {
        state.last_result = None;
        return state.with_status(STATUS_READY);
    }

    let result = clean_text(&state.original_text, options);
    let status = describe_cleaning(&result);
    state.last_result = Some(result);
    state.status = status;
    state
}

/// Runs `action` against `state` and returns the next state.
pub fn execute_action<C>(
    clipboard: &mut C,
    state: SessionState,
    action: AppAction,
    options: &CleaningOptions,
) -> SessionState
where
    C: ClipboardProvider + ?Sized,
{
    debug!(?action, "Executing action");

    match action {
        AppAction::Paste => match clipboard.read_text() {
            Ok(Some(text)) => process_text(state, text, options).with_status(STATUS_PASTED),
            Ok(None) => state.with_status(STATUS_CLIPBOARD_EMPTY),
            Err(e) => {
                warn!(error = %e, "Paste: failed to read clipboard");
                state.with_status(STATUS_READ_ERROR)
            }
        },
        AppAction::Input(text) => process_text(state, text, options),
        AppAction::CopyCleaned => {
            if !state.can_copy_cleaned() {
                debug!("Copy Cleaned: nothing to copy");
                return state;
            }
            let written = clipboard.write_text(state.cleaned_text().unwrap_or_default());
            match written {
                Ok(()) => state.with_status(STATUS_COPIED_CLEANED),
                Err(e) => {
                    warn!(error = %e, "Copy Cleaned: failed to write clipboard");
                    state.with_status(STATUS_COPY_ERROR)
                }
            }
        }
        AppAction::CopyOriginal => {
            if !state.can_copy_original() {
                debug!("Copy Original: nothing to copy");
                return state;
            }
            match clipboard.write_text(&state.original_text) {
                Ok(()) => state.with_status(STATUS_COPIED_ORIGINAL),
                Err(e) => {
                    warn!(error = %e, "Copy Original: failed to write clipboard");
                    state.with_status(STATUS_COPY_ERROR)
                }
            }
        }
        AppAction::Clear => SessionState::default(),
    }
}
