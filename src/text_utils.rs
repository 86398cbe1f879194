// src/text_utils.rs
// Canonical comparison form for user-supplied track, artist, album and keyword text

use once_cell::sync::Lazy;
use regex::Regex;

// ` ~ ! @ # $ % ^ & * ( ) _ | + - = ? ; : , . < > { } [ ] \ /
static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[`~!@#$%^&*()_|+\-=?;:,.<>{}\[\]\\/]").unwrap());

// Straight and curly apostrophes are dropped, not spaced: "don't" -> "dont"
static APOSTROPHE_RE: Lazy<Regex> = Lazy::new(|| Regex::new("['\u{2018}\u{2019}]").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize free text for matching against the precomputed lowercase columns.
///
/// Lower-cases, turns every punctuation character into a space, removes
/// apostrophes, then collapses whitespace runs and trims. Total and idempotent;
/// characters outside the punctuation set pass through untouched.
pub fn normalize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let lower = input.to_lowercase();
    let spaced = PUNCTUATION_RE.replace_all(&lower, " ");
    let stripped = APOSTROPHE_RE.replace_all(&spaced, "");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

/// Normalize an optional parameter, mapping "normalizes to nothing" onto `None`.
///
/// A missing value, an empty string and something like `"  !! "` are all the
/// same thing to the matcher: the field was not provided.
pub fn prepare_optional(input: Option<&str>) -> Option<String> {
    let normalized = normalize(input?);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Split already-normalized text into search tokens.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}
