//! Code point range tables for each class of hidden character.
//!
//! Every table is an ordered list of inclusive ranges. A character belongs to a
//! class when any range of the table contains it. All ranges sit inside the basic
//! multilingual plane and none of them touches the surrogate block, so testing a
//! `char` gives the same answer as testing each UTF-16 code unit on its own.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

/// Zero-width space, non-joiner, joiner, byte order mark, word joiner and the
/// Mongolian vowel separator.
pub const ZERO_WIDTH: &[RangeInclusive<char>] = &[
    '\u{200B}'..='\u{200D}',
    '\u{FEFF}'..='\u{FEFF}',
    '\u{2060}'..='\u{2060}',
    '\u{180E}'..='\u{180E}',
];

/// General punctuation spaces, separators and format controls, plus the
/// ideographic space and the Hangul filler.
pub const INVISIBLE: &[RangeInclusive<char>] = &[
    '\u{2000}'..='\u{200F}',
    '\u{2028}'..='\u{202F}',
    '\u{205F}'..='\u{206F}',
    '\u{3000}'..='\u{3000}',
    '\u{3164}'..='\u{3164}',
];

/// C0 and C1 controls, DEL included.
pub const CONTROL: &[RangeInclusive<char>] = &['\u{0000}'..='\u{001F}', '\u{007F}'..='\u{009F}'];

/// [`CONTROL`] minus tab, line feed and carriage return.
pub const CONTROL_PRESERVING_WHITESPACE: &[RangeInclusive<char>] = &[
    '\u{0000}'..='\u{0008}',
    '\u{000B}'..='\u{000C}',
    '\u{000E}'..='\u{001F}',
    '\u{007F}'..='\u{009F}',
];

pub const LINE_BREAK: &[RangeInclusive<char>] = &['\r'..='\r', '\n'..='\n'];

/// The specials block, including the U+FFFE/U+FFFF non-characters.
pub const NON_PRINTABLE: &[RangeInclusive<char>] = &['\u{FFF0}'..='\u{FFFF}'];

/// Returns true when any range of `table` contains `c`.
pub fn in_ranges(table: &[RangeInclusive<char>], c: char) -> bool {
    table.iter().any(|range| range.contains(&c))
}

/// Reporting category for removed characters, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharCategory {
    ZeroWidth,
    Invisible,
    Control,
    NonPrintable,
}

impl CharCategory {
    pub const ALL: [CharCategory; 4] = [
        CharCategory::ZeroWidth,
        CharCategory::Invisible,
        CharCategory::Control,
        CharCategory::NonPrintable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ZeroWidth => "zero-width",
            Self::Invisible => "invisible",
            Self::Control => "control",
            Self::NonPrintable => "non-printable",
        }
    }

    /// Labelling table. Control always uses the full range here, regardless of
    /// whether whitespace was preserved while cleaning.
    pub fn ranges(&self) -> &'static [RangeInclusive<char>] {
        match self {
            Self::ZeroWidth => ZERO_WIDTH,
            Self::Invisible => INVISIBLE,
            Self::Control => CONTROL,
            Self::NonPrintable => NON_PRINTABLE,
        }
    }

    pub fn contains(&self, c: char) -> bool {
        in_ranges(self.ranges(), c)
    }
}

impl fmt::Display for CharCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
