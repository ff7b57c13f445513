//! Core types shared across the reconciliation and translation pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One language's localized strings: a recursive mapping from string keys to
/// either a leaf value or another tree.
///
/// Parsed from a serialized JSON document, so it contains no cycles. The
/// `preserve_order` feature of `serde_json` keeps document insertion order,
/// which the flattener and reconciler rely on.
pub type TranslationTree = serde_json::Map<String, Value>;

/// A dot-joined path uniquely addressing one leaf in a [`TranslationTree`].
pub type FlatKey = String;

/// A source key missing from one or more target languages.
///
/// Produced by [`crate::reconcile::check_translations`]; `missing_languages`
/// mirrors the order in which target languages were scanned and never
/// contains duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub key: FlatKey,
    pub source_value: String,
    pub missing_languages: Vec<String>,
}

impl MissingEntry {
    pub fn new(
        key: impl Into<FlatKey>,
        source_value: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        MissingEntry {
            key: key.into(),
            source_value: source_value.into(),
            missing_languages: vec![language.into()],
        }
    }

    /// Appends a language, keeping the list duplicate-free.
    pub fn record_language(&mut self, language: &str) {
        if !self.missing_languages.iter().any(|l| l == language) {
            self.missing_languages.push(language.to_string());
        }
    }
}

/// Per-item outcome of a provider call inside a batch.
///
/// Exactly one of translation/error exists, enforced by the `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub source_text: String,
    pub outcome: Result<String, String>,
}

impl BatchResult {
    pub fn translation(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }

    pub fn error(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }
}

/// Emitted once per attempted (key, language) pair during a fix run,
/// regardless of outcome. `translation` is `None` when the pair produced no
/// usable translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub completed: usize,
    pub total: usize,
    pub current_key: FlatKey,
    pub translation: Option<String>,
}
