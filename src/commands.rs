//! Command implementations for the `clipclean` binary.
//!
//! Cleaned text goes to `out`; summaries and status lines go to `err`, so the
//! output can be piped without the report mixed in.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::actions::{self, AppAction, SessionState};
use crate::cleaner::{clean_text, describe_cleaning, CleaningOptions, CleaningResult};
use crate::cli::OutputFlags;
use crate::config::{self, FullConfig};
use crate::error::AppError;
use crate::system::ClipboardProvider;

/// Reported by `fix` when the clipboard is left as it was because nothing
/// non-blank remains to write back.
pub const STATUS_NOTHING_TO_WRITE: &str = "Nothing to write back";

fn write_report(err: &mut dyn Write, result: &CleaningResult) -> Result<(), AppError> {
    writeln!(err, "{}", describe_cleaning(result))?;
    writeln!(
        err,
        "original: {}  cleaned: {}  removed: {}",
        result.original_length, result.cleaned_length, result.removed_count
    )?;
    Ok(())
}

fn write_result(
    out: &mut dyn Write,
    err: &mut dyn Write,
    result: &CleaningResult,
    output: OutputFlags,
) -> Result<(), AppError> {
    if output.json {
        serde_json::to_writer_pretty(&mut *out, result)?;
        writeln!(out)?;
        return Ok(());
    }

    out.write_all(result.cleaned_text.as_bytes())?;
    out.flush()?;
    if !output.quiet {
        write_report(err, result)?;
    }
    Ok(())
}

/// Cleans `input` and prints it.
pub fn clean(
    input: &str,
    options: &CleaningOptions,
    output: OutputFlags,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), AppError> {
    let result = clean_text(input, options);
    write_result(out, err, &result, output)
}

fn paste_state<C>(clipboard: &mut C, options: &CleaningOptions) -> Result<SessionState, AppError>
where
    C: ClipboardProvider + ?Sized,
{
    let state = actions::execute_action(
        clipboard,
        SessionState::default(),
        AppAction::Paste,
        options,
    );
    if state.status == actions::STATUS_READ_ERROR {
        return Err(AppError::Action(state.status));
    }
    Ok(state)
}

/// Reads the clipboard, cleans it and prints the result.
pub fn paste<C>(
    clipboard: &mut C,
    options: &CleaningOptions,
    output: OutputFlags,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), AppError>
where
    C: ClipboardProvider + ?Sized,
{
    let state = paste_state(clipboard, options)?;
    match &state.last_result {
        Some(result) => write_result(out, err, result, output),
        None => {
            if !output.quiet {
                writeln!(err, "{}", state.status)?;
            }
            Ok(())
        }
    }
}

/// Reads the clipboard, cleans it and writes the cleaned text back.
pub fn fix<C>(
    clipboard: &mut C,
    options: &CleaningOptions,
    quiet: bool,
    err: &mut dyn Write,
) -> Result<(), AppError>
where
    C: ClipboardProvider + ?Sized,
{
    let state = paste_state(clipboard, options)?;
    let Some(result) = state.last_result.clone() else {
        if !quiet {
            // Blank clipboard text is read but never cleaned.
            let status = if state.status == actions::STATUS_PASTED {
                STATUS_NOTHING_TO_WRITE
            } else {
                state.status.as_str()
            };
            writeln!(err, "{status}")?;
        }
        return Ok(());
    };

    if result.removed_chars.is_empty() {
        info!("Clipboard already clean, leaving it untouched");
        if !quiet {
            write_report(err, &result)?;
        }
        return Ok(());
    }

    if !state.can_copy_cleaned() {
        info!("Cleaned text is empty, leaving clipboard untouched");
        if !quiet {
            write_report(err, &result)?;
            writeln!(err, "{STATUS_NOTHING_TO_WRITE}")?;
        }
        return Ok(());
    }

    let state = actions::execute_action(clipboard, state, AppAction::CopyCleaned, options);
    if state.status == actions::STATUS_COPY_ERROR {
        return Err(AppError::Action(state.status));
    }
    if !quiet {
        write_report(err, &result)?;
        writeln!(err, "{}", state.status)?;
    }
    Ok(())
}

pub fn formats<C>(clipboard: &mut C, json: bool, out: &mut dyn Write) -> Result<(), AppError>
where
    C: ClipboardProvider + ?Sized,
{
    let formats = clipboard.available_formats()?;
    if json {
        serde_json::to_writer(&mut *out, &formats)?;
        writeln!(out)?;
    } else {
        for format in formats {
            writeln!(out, "{format}")?;
        }
    }
    Ok(())
}

pub fn show_config(cfg: &FullConfig, out: &mut dyn Write) -> Result<(), AppError> {
    match config::config_path() {
        Some(path) => writeln!(out, "path: {}", path.display())?,
        None => writeln!(out, "path: (no config directory on this platform)")?,
    }
    writeln!(out, "log_level: {}", cfg.log_level().as_filter())?;

    let options = cfg.cleaning_options();
    writeln!(out, "remove_zero_width: {}", options.remove_zero_width)?;
    writeln!(out, "remove_invisible: {}", options.remove_invisible)?;
    writeln!(out, "remove_control_chars: {}", options.remove_control_chars)?;
    writeln!(out, "remove_non_printable: {}", options.remove_non_printable)?;
    writeln!(out, "preserve_whitespace: {}", options.preserve_whitespace)?;
    Ok(())
}

/// Updates one key in the config file at `path`.
///
/// The existing file must load cleanly; a corrupt file is reported instead of
/// being replaced, so settings already in it are never dropped.
pub fn set_config(
    path: &Path,
    key: &str,
    value: &str,
    out: &mut dyn Write,
) -> Result<FullConfig, AppError> {
    let mut cfg = config::load_config_from(path)?;
    cfg.set(key, value)?;
    config::save_config_to(path, &cfg)?;
    info!(key, "Config updated");
    writeln!(out, "{key} updated")?;
    Ok(cfg)
}

/// Runs named actions in order over one session, printing each resulting status.
/// All names are checked before anything touches the clipboard.
pub fn run_actions<C>(
    clipboard: &mut C,
    names: &[String],
    options: &CleaningOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), AppError>
where
    C: ClipboardProvider + ?Sized,
{
    let parsed = names
        .iter()
        .map(|name| {
            actions::parse_app_action(name)
                .ok_or_else(|| AppError::Action(format!("Unknown action: {name}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut state = SessionState::default();
    for action in parsed {
        let name = action.name();
        state = actions::execute_action(clipboard, state, action, options);
        writeln!(err, "{name}: {}", state.status)?;
        if state.status == actions::STATUS_READ_ERROR || state.status == actions::STATUS_COPY_ERROR
        {
            return Err(AppError::Action(state.status));
        }
    }

    if let Some(text) = state.cleaned_text() {
        out.write_all(text.as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MemoryClipboard;

    fn run_clean(input: &str, options: &CleaningOptions, output: OutputFlags) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        clean(input, options, output, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_clean_prints_text_and_report() {
        let (out, err) = run_clean(
            "a\u{200B}b\n",
            &CleaningOptions::default(),
            OutputFlags::default(),
        );
        assert_eq!(out, "ab\n");
        assert!(err.contains("Removed 1 hidden character"));
        assert!(err.contains("original: 4  cleaned: 3  removed: 1"));
    }

    #[test]
    fn test_clean_quiet_and_json() {
        let quiet = OutputFlags {
            quiet: true,
            ..OutputFlags::default()
        };
        let (out, err) = run_clean("x\u{FEFF}", &CleaningOptions::default(), quiet);
        assert_eq!(out, "x");
        assert!(err.is_empty());

        let json = OutputFlags {
            json: true,
            ..OutputFlags::default()
        };
        let (out, _) = run_clean("x\u{FEFF}", &CleaningOptions::default(), json);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["cleaned_text"], "x");
        assert_eq!(value["removed_count"], 1);
    }

    #[test]
    fn test_paste_empty_clipboard() {
        let mut clipboard = MemoryClipboard::default();
        let mut out = Vec::new();
        let mut err = Vec::new();
        paste(
            &mut clipboard,
            &CleaningOptions::default(),
            OutputFlags::default(),
            &mut out,
            &mut err,
        )
        .unwrap();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "Clipboard is empty\n");
    }

    #[test]
    fn test_paste_read_failure_is_error() {
        let mut clipboard = MemoryClipboard::failing();
        let result = paste(
            &mut clipboard,
            &CleaningOptions::default(),
            OutputFlags::default(),
            &mut Vec::new(),
            &mut Vec::new(),
        );
        assert!(matches!(result, Err(AppError::Action(_))));
    }

    #[test]
    fn test_fix_writes_back_cleaned_text() {
        let mut clipboard = MemoryClipboard::with_text("pass\u{200C}word");
        let mut err = Vec::new();
        fix(&mut clipboard, &CleaningOptions::default(), false, &mut err).unwrap();
        assert_eq!(clipboard.text.as_deref(), Some("password"));
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("Cleaned text copied to clipboard"));
    }

    #[test]
    fn test_fix_leaves_clean_clipboard_alone() {
        let mut clipboard = MemoryClipboard::with_text("nothing hidden");
        let mut err = Vec::new();
        fix(&mut clipboard, &CleaningOptions::default(), false, &mut err).unwrap();
        assert_eq!(clipboard.text.as_deref(), Some("nothing hidden"));
        assert!(String::from_utf8(err)
            .unwrap()
            .starts_with("No hidden characters found"));
    }

    #[test]
    fn test_fix_applies_line_break_substitution() {
        let options = CleaningOptions {
            remove_control_chars: false,
            preserve_whitespace: false,
            ..CleaningOptions::default()
        };
        let mut clipboard = MemoryClipboard::with_text("one\ntwo");
        fix(&mut clipboard, &options, true, &mut Vec::new()).unwrap();
        assert_eq!(clipboard.text.as_deref(), Some("one two"));
    }

    #[test]
    fn test_formats_listing() {
        let mut clipboard = MemoryClipboard::with_text("abc");
        let mut out = Vec::new();
        formats(&mut clipboard, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "text/plain\n");

        let mut out = Vec::new();
        formats(&mut MemoryClipboard::default(), true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }

    #[test]
    fn test_show_config_lists_effective_options() {
        let mut cfg = FullConfig::default();
        cfg.set("remove_line_breaks", "true").unwrap();
        let mut out = Vec::new();
        show_config(&cfg, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("log_level: warn"));
        assert!(out.contains("preserve_whitespace: false"));
        assert!(out.contains("remove_zero_width: true"));
    }

    #[test]
    fn test_set_config_refuses_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let corrupt = r#"{"remove_invisible": false, "preserve_whitespace": false, "log_level": "debug",}"#;
        std::fs::write(&path, corrupt).unwrap();

        let mut out = Vec::new();
        let result = set_config(&path, "remove_zero_width", "false", &mut out);
        assert!(matches!(
            result,
            Err(AppError::Config(config::ConfigError::Json(_)))
        ));
        assert!(out.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), corrupt);
    }

    #[test]
    fn test_set_config_keeps_existing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"remove_invisible": false, "log_level": "debug"}"#).unwrap();

        let mut out = Vec::new();
        let cfg = set_config(&path, "remove_zero_width", "false", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "remove_zero_width updated\n");

        let reloaded = config::load_config_from(&path).unwrap();
        assert_eq!(reloaded, cfg);
        assert_eq!(reloaded.remove_invisible, Some(false));
        assert_eq!(reloaded.remove_zero_width, Some(false));
        assert_eq!(reloaded.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_fix_blank_clipboard_reports_nothing_written() {
        let mut clipboard = MemoryClipboard::with_text("  \n\t ");
        let mut err = Vec::new();
        fix(&mut clipboard, &CleaningOptions::default(), false, &mut err).unwrap();
        assert_eq!(clipboard.text.as_deref(), Some("  \n\t "));
        assert_eq!(String::from_utf8(err).unwrap(), "Nothing to write back\n");
    }

    #[test]
    fn test_fix_all_hidden_clipboard_reports_nothing_written() {
        let mut clipboard = MemoryClipboard::with_text("\u{200B}\u{FEFF}");
        let mut err = Vec::new();
        fix(&mut clipboard, &CleaningOptions::default(), false, &mut err).unwrap();
        assert_eq!(clipboard.text.as_deref(), Some("\u{200B}\u{FEFF}"));
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("Removed 2 hidden characters"));
        assert!(err.ends_with("Nothing to write back\n"));
        assert!(!err.contains(actions::STATUS_PASTED));
    }

    #[test]
    fn test_run_actions_paste_then_copy() {
        let mut clipboard = MemoryClipboard::with_text("a\u{2060}b");
        let names = ["paste".to_string(), "copy-cleaned".to_string()];
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_actions(
            &mut clipboard,
            &names,
            &CleaningOptions::default(),
            &mut out,
            &mut err,
        )
        .unwrap();
        assert_eq!(clipboard.text.as_deref(), Some("ab"));
        assert_eq!(String::from_utf8(out).unwrap(), "ab");
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "paste: Text pasted from clipboard\ncopy-cleaned: Cleaned text copied to clipboard\n"
        );
    }

    #[test]
    fn test_run_actions_rejects_unknown_name_before_running() {
        let mut clipboard = MemoryClipboard::with_text("a\u{2060}b");
        let names = ["paste".to_string(), "shred".to_string()];
        let mut err = Vec::new();
        let result = run_actions(
            &mut clipboard,
            &names,
            &CleaningOptions::default(),
            &mut Vec::new(),
            &mut err,
        );
        assert!(matches!(result, Err(AppError::Action(msg)) if msg == "Unknown action: shred"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_actions_stops_on_read_failure() {
        let mut clipboard = MemoryClipboard::failing();
        let names = ["paste".to_string(), "copy-cleaned".to_string()];
        let mut err = Vec::new();
        let result = run_actions(
            &mut clipboard,
            &names,
            &CleaningOptions::default(),
            &mut Vec::new(),
            &mut err,
        );
        assert!(matches!(result, Err(AppError::Action(_))));
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "paste: Error reading from clipboard\n"
        );
    }
}
