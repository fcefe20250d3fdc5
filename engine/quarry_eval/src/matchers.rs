//! Regex and raw-substring tests on runtime string values.
//!
//! Patterns are compiled by the rule compiler and carried in the
//! expression tree; this module only executes them against a string
//! variable's current value.

use regex::bytes::Regex;

/// Run a compiled pattern against the full value.
///
/// An empty value never matches and skips the engine entirely.
pub fn regex_matches(value: &str, regex: &Regex) -> bool {
    if value.is_empty() {
        return false;
    }
    regex.is_match(value.as_bytes())
}

/// Raw byte subsequence test. An empty needle is contained everywhere.
pub fn contains(value: &str, needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack = value.as_bytes();
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}
