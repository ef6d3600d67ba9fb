//! Human-readable summaries of a cleaning result.

use std::collections::BTreeSet;

use super::{CharCategory, CleaningResult};

pub const NO_HIDDEN_CHARACTERS: &str = "No hidden characters found";

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Categories with at least one member in `chars`, in [`CharCategory::ALL`] order.
///
/// A character may land in more than one category (U+200B is both zero-width
/// and invisible), so the same character can produce several labels.
pub fn classify_removed_characters(chars: &BTreeSet<char>) -> Vec<CharCategory> {
    CharCategory::ALL
        .into_iter()
        .filter(|category| chars.iter().any(|&c| category.contains(c)))
        .collect()
}

/// One-line status message, e.g. `Removed 3 hidden characters (2 unique types): zero-width, control`.
///
/// Only the net `removed_count` decides whether anything was found; line breaks
/// replaced by spaces alone report nothing.
pub fn describe_cleaning(result: &CleaningResult) -> String {
    if result.removed_count == 0 {
        return NO_HIDDEN_CHARACTERS.to_string();
    }

    let mut description = format!(
        "Removed {} hidden character{}",
        result.removed_count,
        plural(result.removed_count)
    );

    let unique = result.removed_chars.len();
    if unique > 0 {
        description.push_str(&format!(" ({} unique type{})", unique, plural(unique)));
    }

    let labels: Vec<&str> = classify_removed_characters(&result.removed_chars)
        .iter()
        .map(CharCategory::label)
        .collect();
    if !labels.is_empty() {
        description.push_str(": ");
        description.push_str(&labels.join(", "));
    }

    description
}
