use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use super::leading_chars;

/// Words that mark a capitalised phrase as a contact/profile label rather
/// than a person's name.
pub const EXCLUDED_KEYWORDS: &[&str] = &[
    "Address",
    "Phone",
    "Location",
    "Email",
    "Contact",
    "Passport",
    "Nationality",
    "Visa",
    "Driving",
    "LinkedIn",
    "Facebook",
];

/// `Name:` label (capitalised, whole word) followed by the value on the
/// same line.
static LABELLED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bName:[ \t]+([A-Za-z][A-Za-z .'\-]*)").expect("valid regex")
});

/// Two or three consecutive capitalised words on one line.
static CANDIDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-zA-Z]+(?:[ \t]+[A-Z][a-zA-Z]+){1,2}").expect("valid regex")
});

static EXCLUDED_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(&EXCLUDED_KEYWORDS.join("|"))
        .case_insensitive(true)
        .build()
        .expect("valid regex")
});

/// Finds the candidate's name: an explicit `Name:` label anywhere in the
/// text takes precedence, otherwise the first capitalised phrase within the
/// leading `window_chars` characters that contains no excluded keyword.
pub fn find_name(text: &str, window_chars: usize) -> Option<String> {
    labelled_name(text).or_else(|| heuristic_name(leading_chars(text, window_chars)))
}

fn labelled_name(text: &str) -> Option<String> {
    LABELLED_NAME_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

fn heuristic_name(window: &str) -> Option<String> {
    CANDIDATE_RE
        .find_iter(window)
        .map(|m| m.as_str())
        .find(|candidate| !is_excluded(candidate))
        .map(str::to_string)
}

/// The check looks only at the phrase itself, never at surrounding text.
pub fn is_excluded(candidate: &str) -> bool {
    EXCLUDED_RE.is_match(candidate)
}
