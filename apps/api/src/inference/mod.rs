//! Heuristic name/email inference over unstructured resume text.
//!
//! `FieldInferencer::infer` is a pure function of its input: no I/O and no
//! state carried between calls.

pub mod email;
pub mod name;

/// Absence marker used for both fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Default number of leading characters searched for an unlabelled name.
pub const DEFAULT_NAME_WINDOW_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredFields {
    /// Best-guess candidate name, or `"N/A"`.
    pub name: String,
    /// Comma-joined addresses in order of appearance, or `"N/A"`.
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceConfig {
    pub name_window_chars: usize,
    /// `None` scans the whole text.
    pub email_window_chars: Option<usize>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            name_window_chars: DEFAULT_NAME_WINDOW_CHARS,
            email_window_chars: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldInferencer {
    config: InferenceConfig,
}

impl FieldInferencer {
    pub fn new(config: InferenceConfig) -> Self {
        FieldInferencer { config }
    }

    pub fn infer(&self, text: &str) -> InferredFields {
        let email_scope = match self.config.email_window_chars {
            Some(limit) => leading_chars(text, limit),
            None => text,
        };
        let emails = email::find_emails(email_scope);
        let name = name::find_name(text, self.config.name_window_chars);

        InferredFields {
            name: name.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            email: if emails.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                emails.join(", ")
            },
        }
    }
}

/// Longest prefix of `text` holding at most `limit` characters.
pub(crate) fn leading_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
