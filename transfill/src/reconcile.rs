//! Computing which target languages lack translations present in the source.

use std::collections::HashMap;

use crate::{
    error::Error,
    flatten::flatten,
    store::TreeStore,
    types::{MissingEntry, TranslationTree},
};

/// Diffs the source tree against every target language.
///
/// Targets are scanned in the caller-supplied order. A target whose resource
/// does not exist at all is missing every source key; an existing target is
/// flattened and compared key by key. A key counts as present only when the
/// target holds a non-empty string for it.
///
/// Every source key absent from at least one target is reported exactly
/// once: a key missing in several languages accumulates them all into one
/// [`MissingEntry`], with `missing_languages` mirroring the scan order.
/// Entries follow the source tree's flattened (depth-first, document) order
/// of first discovery.
///
/// Fails with [`Error::Read`] if a target resource exists but cannot be
/// parsed; partial results against a corrupt target would be misleading.
pub fn check_translations(
    source: &TranslationTree,
    target_languages: &[String],
    store: &dyn TreeStore,
) -> Result<Vec<MissingEntry>, Error> {
    let flattened_source = flatten(source);
    let mut entries: Vec<MissingEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for language in target_languages {
        match store.load(language)? {
            Some(target) => {
                let flattened_target = flatten(&target);
                for (key, value) in &flattened_source {
                    let present = flattened_target.get(key).is_some_and(|v| !v.is_empty());
                    if !present {
                        record_missing(&mut entries, &mut index, key, value, language);
                    }
                }
            }
            None => {
                tracing::debug!(%language, "target resource missing, all source keys unfilled");
                for (key, value) in &flattened_source {
                    record_missing(&mut entries, &mut index, key, value, language);
                }
            }
        }
    }

    Ok(entries)
}

fn record_missing(
    entries: &mut Vec<MissingEntry>,
    index: &mut HashMap<String, usize>,
    key: &str,
    value: &str,
    language: &str,
) {
    match index.get(key) {
        Some(&at) => entries[at].record_language(language),
        None => {
            index.insert(key.to_string(), entries.len());
            entries.push(MissingEntry::new(key, value, language));
        }
    }
}
