//! Normalizing arbitrary text into safe identifier-like tokens.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISALLOWED_REGEX: Regex = Regex::new(r"[^\w\s-]").expect("valid disallowed regex");
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
}

/// Turns arbitrary text into a safe fallback identifier.
///
/// The pipeline is order-sensitive: dots become underscores, then every
/// character outside letters/digits/underscore/hyphen/whitespace is
/// stripped, whitespace runs collapse to single underscores, the result is
/// lowercased, and leading/trailing underscores are trimmed.
///
/// This has no effect on flat-key semantics; those come from the tree
/// structure, not from sanitization.
pub fn sanitize(text: &str) -> String {
    let dotless = text.replace('.', "_");
    let cleaned = DISALLOWED_REGEX.replace_all(&dotless, "");
    let collapsed = WHITESPACE_REGEX.replace_all(&cleaned, "_");
    collapsed.to_lowercase().trim_matches('_').to_string()
}
