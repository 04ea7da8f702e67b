//! Pure filename helpers shared by ordering and display naming.
//!
//! Course files carry their identity in the filename alone: `lesson_10.md`
//! sorts by its embedded number and, unless overridden, displays as
//! `lesson_10`. Nothing here touches the filesystem.
//!
//! ## Display Names
//!
//! A file's display name is resolved in priority order:
//!
//! 1. An explicit per-filename override from the catalog.
//! 2. A [`NamePattern`] match: `prefix`, an optional run of `_` or
//!    whitespace, then digits. The digits replace `{n}` in the format.
//!    `lesson_7.md` with prefix `lesson` and format `Lesson {n}` → "Lesson 7".
//! 3. The filename with its `.md` suffix removed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Suffix a file needs to be picked up by the scanner.
pub const MARKDOWN_SUFFIX: &str = ".md";

/// Placeholder replaced by the matched digits in [`NamePattern::format`].
pub const NUMBER_PLACEHOLDER: &str = "{n}";

/// Prefix-plus-number naming rule for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamePattern {
    /// Word preceding the number, matched case-insensitively (e.g. `lesson`).
    pub prefix: String,
    /// Display template; `{n}` is replaced by the digits as written.
    pub format: String,
}

impl NamePattern {
    /// Derive a display name, or `None` when the filename doesn't match.
    pub fn apply(&self, filename: &str) -> Option<String> {
        let digits = match_prefixed_number(filename, &self.prefix)?;
        Some(self.format.replace(NUMBER_PLACEHOLDER, digits))
    }
}

/// Remove a trailing `.md`, if present.
pub fn strip_markdown_suffix(filename: &str) -> &str {
    filename.strip_suffix(MARKDOWN_SUFFIX).unwrap_or(filename)
}

/// Whether the scanner should pick this filename up.
pub fn is_markdown(filename: &str) -> bool {
    filename.ends_with(MARKDOWN_SUFFIX)
}

/// Value of the first run of ASCII digits in `name`, or 0 when there is none.
///
/// Runs too long for a `u64` saturate instead of wrapping so they still sort last.
///
/// - `"lesson_10.md"` → 10
/// - `"v2_part3.md"` → 2
/// - `"tickets.md"` → 0
pub fn first_number(name: &str) -> u64 {
    let Some(start) = name.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };
    name[start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, d| {
            acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
        })
}

/// Find the leftmost `prefix[_\s]*digits` in `filename` and return the digits.
fn match_prefixed_number<'a>(filename: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    filename.char_indices().find_map(|(start, _)| {
        let after_prefix = start + strip_prefix_ignore_case(&filename[start..], prefix)?;
        let rest = &filename[after_prefix..];
        let rest = rest.trim_start_matches(|c: char| c == '_' || c.is_whitespace());
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        (len > 0).then(|| &rest[..len])
    })
}

/// Byte length of the case-insensitive match of `prefix` at the start of `s`.
fn strip_prefix_ignore_case(s: &str, prefix: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map(|(i, _)| i).unwrap_or(s.len()))
}

/// Resolve the display name for `filename`: override, then pattern, then bare stem.
pub fn display_name(
    filename: &str,
    overrides: &BTreeMap<String, String>,
    pattern: Option<&NamePattern>,
) -> String {
    if let Some(name) = overrides.get(filename).filter(|n| !n.is_empty()) {
        return name.clone();
    }
    pattern
        .and_then(|p| p.apply(filename))
        .unwrap_or_else(|| bare_name(filename).to_string())
}

/// Filename without `.md`; a file named just `.md` keeps its full name.
fn bare_name(filename: &str) -> &str {
    match strip_markdown_suffix(filename) {
        "" => filename,
        stem => stem,
    }
}
