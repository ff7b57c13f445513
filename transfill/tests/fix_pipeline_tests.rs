//! End-to-end fix runs against real resource files in a temp directory.

use async_trait::async_trait;
use serde_json::json;
use std::{fs, path::Path, time::Duration};
use transfill::{
    Config, Error, FsStore, RetryPolicy, TranslationTree, Translator, TreeStore,
    check_translations, fix_translations, flatten,
};

struct SuffixTranslator;

#[async_trait]
impl Translator for SuffixTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, Error> {
        if text == "untranslatable" {
            return Ok(String::new());
        }
        Ok(format!("{text} [{target_language}]"))
    }

    fn name(&self) -> &str {
        "suffix"
    }
}

fn write_json(path: &Path, value: serde_json::Value) {
    fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn config_for(dir: &Path, targets: &[&str]) -> Config {
    Config {
        target_languages: targets.iter().map(|l| l.to_string()).collect(),
        i18n_path: dir.to_path_buf(),
        ..Config::default()
    }
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1))
}

fn load_tree(store: &FsStore, language: &str) -> TranslationTree {
    store.load(language).unwrap().expect("tree should exist")
}

#[tokio::test]
async fn test_fix_creates_target_files_with_nested_structure() {
    let dir = tempfile::tempdir().unwrap();
    write_json(
        &dir.path().join("en.json"),
        json!({ "home": { "title": "Welcome", "description": "Hello World" } }),
    );

    let config = config_for(dir.path(), &["tr", "fr"]);
    let store = FsStore::new(dir.path());

    let report = fix_translations(&config, &SuffixTranslator, &store, &fast_retry(), |_| {})
        .await
        .unwrap();

    assert_eq!(report.translated.len(), 4);
    assert_eq!(report.attempted, 4);
    assert!(report.failed.is_empty());

    let tr = flatten(&load_tree(&store, "tr"));
    assert_eq!(tr.get("home.title"), Some(&"Welcome [tr]".to_string()));
    assert_eq!(tr.get("home.description"), Some(&"Hello World [tr]".to_string()));

    let fr = flatten(&load_tree(&store, "fr"));
    assert_eq!(fr.get("home.title"), Some(&"Welcome [fr]".to_string()));

    // Persisted with 2-space indentation.
    let text = fs::read_to_string(dir.path().join("tr.json")).unwrap();
    assert!(text.contains("\n  \"home\": {"));
}

#[tokio::test]
async fn test_fix_preserves_existing_target_entries() {
    let dir = tempfile::tempdir().unwrap();
    write_json(
        &dir.path().join("en.json"),
        json!({ "home": { "title": "Welcome", "description": "Hello World" } }),
    );
    write_json(
        &dir.path().join("tr.json"),
        json!({ "home": { "title": "Hoşgeldin" }, "extra": "kalsın" }),
    );

    let config = config_for(dir.path(), &["tr"]);
    let store = FsStore::new(dir.path());

    let report = fix_translations(&config, &SuffixTranslator, &store, &fast_retry(), |_| {})
        .await
        .unwrap();

    assert_eq!(report.translated.len(), 1);
    let tr = flatten(&load_tree(&store, "tr"));
    // Pre-existing translations and keys unknown to the source survive.
    assert_eq!(tr.get("home.title"), Some(&"Hoşgeldin".to_string()));
    assert_eq!(tr.get("extra"), Some(&"kalsın".to_string()));
    assert_eq!(tr.get("home.description"), Some(&"Hello World [tr]".to_string()));
}

#[tokio::test]
async fn test_empty_translation_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_json(&dir.path().join("en.json"), json!({ "label": "untranslatable" }));

    let config = config_for(dir.path(), &["tr"]);
    let store = FsStore::new(dir.path());

    let mut events = Vec::new();
    let report = fix_translations(&config, &SuffixTranslator, &store, &fast_retry(), |e| {
        events.push(e.clone());
    })
    .await
    .unwrap();

    assert_eq!(report.failed.len(), 1);
    // No tr.json was ever created for the failed pair.
    assert!(!dir.path().join("tr.json").exists());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].translation, None);
}

#[tokio::test]
async fn test_check_then_fix_converges_to_no_missing_entries() {
    let dir = tempfile::tempdir().unwrap();
    write_json(
        &dir.path().join("en.json"),
        json!({ "home": { "title": "Welcome" }, "footer": "Bye" }),
    );

    let config = config_for(dir.path(), &["tr", "de"]);
    let store = FsStore::new(dir.path());

    let source = store.load_required(&config.source_language).unwrap();
    let before = check_translations(&source, &config.target_languages, &store).unwrap();
    assert_eq!(before.len(), 2);

    fix_translations(&config, &SuffixTranslator, &store, &fast_retry(), |_| {})
        .await
        .unwrap();

    let after = check_translations(&source, &config.target_languages, &store).unwrap();
    assert!(after.is_empty(), "reconciler should find nothing after a full fix");
}

#[tokio::test]
async fn test_corrupt_target_aborts_fix() {
    let dir = tempfile::tempdir().unwrap();
    write_json(&dir.path().join("en.json"), json!({ "label": "Welcome" }));
    fs::write(dir.path().join("tr.json"), "{ not json").unwrap();

    let config = config_for(dir.path(), &["tr"]);
    let store = FsStore::new(dir.path());

    let result =
        fix_translations(&config, &SuffixTranslator, &store, &fast_retry(), |_| {}).await;
    assert!(matches!(result, Err(Error::Read { ref language, .. }) if language == "tr"));
}
