//! Hidden character cleaning.
//!
//! `clean_text` runs up to five passes over the input, each one gated by a flag in
//! [`CleaningOptions`]. Passes run in a fixed order and every pass works on the
//! output of the one before it. Characters a pass matches are recorded in the
//! result's removed set before being deleted (or, for line breaks, replaced by a
//! space).
//!
//! Lengths are counted in UTF-16 code units so the counters line up with what a
//! text field on any platform reports.

mod describe;
pub mod ranges;

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub use describe::{classify_removed_characters, describe_cleaning, NO_HIDDEN_CHARACTERS};
pub use ranges::CharCategory;

use ranges::in_ranges;

/// Which classes of hidden characters to strip. Every flag defaults to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    pub remove_zero_width: bool,
    pub remove_control_chars: bool,
    pub remove_non_printable: bool,
    pub remove_invisible: bool,
    /// Keep tab, LF and CR. When false they are stripped by the control pass
    /// (if enabled) and any remaining CR/LF is replaced by a space.
    pub preserve_whitespace: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            remove_zero_width: true,
            remove_control_chars: true,
            remove_non_printable: true,
            remove_invisible: true,
            preserve_whitespace: true,
        }
    }
}

impl CleaningOptions {
    /// Options that leave any text untouched.
    pub fn none() -> Self {
        Self {
            remove_zero_width: false,
            remove_control_chars: false,
            remove_non_printable: false,
            remove_invisible: false,
            preserve_whitespace: true,
        }
    }
}

/// Outcome of a single `clean_text` call.
///
/// `removed_count` is the net change in length. A line break replaced by a space
/// shows up in `removed_chars` without contributing to `removed_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleaningResult {
    pub cleaned_text: String,
    pub original_length: usize,
    pub cleaned_length: usize,
    pub removed_count: usize,
    pub removed_chars: BTreeSet<char>,
}

#[derive(Debug, Clone, Copy)]
enum PassAction {
    Delete,
    Substitute(char),
}

#[derive(Debug, Clone, Copy)]
struct Pass {
    name: &'static str,
    table: &'static [RangeInclusive<char>],
    action: PassAction,
}

/// The passes enabled by `options`, in application order.
fn enabled_passes(options: &CleaningOptions) -> Vec<Pass> {
    let mut passes = Vec::with_capacity(5);

    if options.remove_zero_width {
        passes.push(Pass {
            name: "zero-width",
            table: ranges::ZERO_WIDTH,
            action: PassAction::Delete,
        });
    }
    if options.remove_invisible {
        passes.push(Pass {
            name: "invisible",
            table: ranges::INVISIBLE,
            action: PassAction::Delete,
        });
    }
    if options.remove_control_chars {
        let table = if options.preserve_whitespace {
            ranges::CONTROL_PRESERVING_WHITESPACE
        } else {
            ranges::CONTROL
        };
        passes.push(Pass {
            name: "control",
            table,
            action: PassAction::Delete,
        });
    }
    if !options.preserve_whitespace {
        passes.push(Pass {
            name: "line-break",
            table: ranges::LINE_BREAK,
            action: PassAction::Substitute(' '),
        });
    }
    if options.remove_non_printable {
        passes.push(Pass {
            name: "non-printable",
            table: ranges::NON_PRINTABLE,
            action: PassAction::Delete,
        });
    }

    passes
}

/// Runs one pass. Returns `None` when nothing in `text` matches.
fn apply_pass(text: &str, pass: &Pass, removed: &mut BTreeSet<char>) -> Option<String> {
    if !text.chars().any(|c| in_ranges(pass.table, c)) {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    let mut matched = 0usize;
    for c in text.chars() {
        if !in_ranges(pass.table, c) {
            out.push(c);
            continue;
        }
        matched += 1;
        removed.insert(c);
        if let PassAction::Substitute(replacement) = pass.action {
            out.push(replacement);
        }
    }

    trace!(pass = pass.name, matched, "Cleaning pass matched characters");
    Some(out)
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Strips hidden characters from `text` according to `options`.
pub fn clean_text(text: &str, options: &CleaningOptions) -> CleaningResult {
    let original_length = utf16_len(text);
    let mut removed_chars = BTreeSet::new();
    let mut current = Cow::Borrowed(text);

    for pass in enabled_passes(options) {
        if let Some(next) = apply_pass(&current, &pass, &mut removed_chars) {
            current = Cow::Owned(next);
        }
    }

    let cleaned_text = current.into_owned();
    let cleaned_length = utf16_len(&cleaned_text);
    let removed_count = original_length - cleaned_length;

    debug!(
        original_length,
        cleaned_length,
        removed_count,
        unique = removed_chars.len(),
        "Text cleaned"
    );

    CleaningResult {
        cleaned_text,
        original_length,
        cleaned_length,
        removed_count,
        removed_chars,
    }
}

/// `clean_text` with default options, returning only the cleaned text.
pub fn quick_clean(text: &str) -> String {
    clean_text(text, &CleaningOptions::default()).cleaned_text
}
