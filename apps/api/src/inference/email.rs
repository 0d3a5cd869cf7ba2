use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid regex")
});

/// All non-overlapping address-shaped substrings, in order of appearance.
/// Duplicates are kept.
pub fn find_emails(text: &str) -> Vec<&str> {
    EMAIL_RE.find_iter(text).map(|m| m.as_str()).collect()
}
