//! Top-level fix orchestration: reconcile, translate, merge, persist.

use serde::Serialize;

use crate::{
    config::Config,
    error::Error,
    flatten::set_nested,
    providers::Translator,
    reconcile::check_translations,
    retry::RetryPolicy,
    store::TreeStore,
    types::{FlatKey, ProgressEvent, TranslationTree},
};

/// One successfully written translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedItem {
    pub key: FlatKey,
    pub language: String,
    pub translation: String,
}

/// Outcome of a fix run.
///
/// The explicit return value keeps the pipeline side-effect-free towards its
/// caller: the progress callback is purely for display, and everything a
/// report renderer needs is in here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixReport {
    pub translated: Vec<TranslatedItem>,
    /// (key, language) pairs that produced no usable translation.
    pub failed: Vec<(FlatKey, String)>,
    /// Number of (key, language) pairs actually attempted.
    pub attempted: usize,
    /// Precomputed progress ceiling: entries × target-language count. Kept
    /// as-is for compatibility even though entries missing in fewer than all
    /// languages make it overshoot `attempted`.
    pub total: usize,
}

impl FixReport {
    /// Last successful translation per key, for rendering result tables.
    pub fn translation_for(&self, key: &str) -> Option<&str> {
        self.translated
            .iter()
            .rev()
            .find(|item| item.key == key)
            .map(|item| item.translation.as_str())
    }
}

/// Fills every missing (key, language) pair found by the reconciler.
///
/// For each pair, in recorded order: loads the current target tree (or
/// starts an empty one), obtains a translation through `retry`-wrapped
/// provider calls, and, only when a non-empty translation came back, merges
/// it and persists the tree immediately. One read-modify-write cycle per
/// pair keeps every completed write durable in the face of interruption.
///
/// `on_progress` fires once per attempted pair regardless of outcome, with
/// `completed` incrementing from 1. A failed or empty translation is never
/// fatal; the gap stays visible through the event's absent `translation`
/// and the report's `failed` list. Only structural errors (unreadable or
/// unwritable resources) abort the run.
pub async fn fix_translations<F>(
    config: &Config,
    translator: &dyn Translator,
    store: &dyn TreeStore,
    retry: &RetryPolicy,
    mut on_progress: F,
) -> Result<FixReport, Error>
where
    F: FnMut(&ProgressEvent),
{
    let source = store.load_required(&config.source_language)?;
    let entries = check_translations(&source, &config.target_languages, store)?;

    let mut report = FixReport {
        total: entries.len() * config.target_languages.len(),
        ..FixReport::default()
    };
    let mut completed = 0;

    for entry in &entries {
        for language in &entry.missing_languages {
            let mut tree: TranslationTree = store.load(language)?.unwrap_or_default();

            let translation = match retry
                .execute(|| translator.translate(&entry.source_value, language))
                .await
            {
                Ok(text) => text,
                Err(error) => {
                    tracing::warn!(
                        key = %entry.key,
                        language = %language,
                        provider = translator.name(),
                        %error,
                        "translation failed"
                    );
                    String::new()
                }
            };

            completed += 1;
            report.attempted += 1;

            let event_translation = if translation.is_empty() {
                report.failed.push((entry.key.clone(), language.clone()));
                None
            } else {
                set_nested(&mut tree, &entry.key, &translation);
                store.save(language, &tree)?;
                report.translated.push(TranslatedItem {
                    key: entry.key.clone(),
                    language: language.clone(),
                    translation: translation.clone(),
                });
                Some(translation)
            };

            on_progress(&ProgressEvent {
                completed,
                total: report.total,
                current_key: entry.key.clone(),
                translation: event_translation,
            });
        }
    }

    Ok(report)
}
