//! Loading and persisting per-language resource files.
//!
//! [`TreeStore`] is the seam between the reconciliation/fix logic and the
//! filesystem. The production implementation is [`FsStore`], which maps a
//! language code to `{root}/{language}.json`; [`MemoryStore`] backs tests
//! and dry runs.

use std::{collections::HashMap, fs, path::PathBuf, sync::Mutex};

use serde_json::Value;

use crate::{error::Error, types::TranslationTree};

/// Read/write access to one language's translation tree.
pub trait TreeStore: Send + Sync {
    /// Loads a language's tree. `Ok(None)` means the resource does not exist;
    /// a resource that exists but cannot be parsed is an [`Error::Read`].
    fn load(&self, language: &str) -> Result<Option<TranslationTree>, Error>;

    /// Persists a language's tree, replacing any previous contents.
    fn save(&self, language: &str, tree: &TranslationTree) -> Result<(), Error>;

    /// Loads a tree that must exist, as the source language's must.
    fn load_required(&self, language: &str) -> Result<TranslationTree, Error> {
        self.load(language)?.ok_or_else(|| {
            Error::validation(format!("resource for language `{language}` not found"))
        })
    }
}

/// Filesystem-backed store over a directory of `{language}.json` files.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsStore { root: root.into() }
    }

    /// Path of the resource file for a language.
    pub fn resource_path(&self, language: &str) -> PathBuf {
        self.root.join(format!("{language}.json"))
    }

    fn parse(&self, language: &str, path: &PathBuf, text: &str) -> Result<TranslationTree, Error> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::read(language, path.clone(), e.to_string()))?;
        match value {
            Value::Object(tree) => Ok(tree),
            other => Err(Error::read(
                language,
                path.clone(),
                format!("expected a top-level object, found {other}"),
            )),
        }
    }
}

impl TreeStore for FsStore {
    fn load(&self, language: &str) -> Result<Option<TranslationTree>, Error> {
        let path = self.resource_path(language);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        self.parse(language, &path, &text).map(Some)
    }

    fn save(&self, language: &str, tree: &TranslationTree) -> Result<(), Error> {
        fs::create_dir_all(&self.root)?;
        let mut text = serde_json::to_string_pretty(tree).map_err(Error::Parse)?;
        text.push('\n');
        fs::write(self.resource_path(language), text)?;
        Ok(())
    }

    /// Validates that the resource exists, is a regular file, and is
    /// non-empty before parsing it. Violations are fatal validation errors:
    /// they indicate a misconfigured environment the user must fix.
    fn load_required(&self, language: &str) -> Result<TranslationTree, Error> {
        let path = self.resource_path(language);
        if !path.exists() {
            return Err(Error::validation(format!("file not found: {}", path.display())));
        }
        let metadata = fs::metadata(&path)?;
        if !metadata.is_file() {
            return Err(Error::validation(format!("invalid file: {}", path.display())));
        }
        if metadata.len() == 0 {
            return Err(Error::validation(format!("empty file: {}", path.display())));
        }
        let text = fs::read_to_string(&path)?;
        self.parse(language, &path, &text)
    }
}

/// In-memory store keyed by language code. Intended for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    trees: Mutex<HashMap<String, TranslationTree>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn insert(&self, language: &str, tree: TranslationTree) {
        if let Ok(mut trees) = self.trees.lock() {
            trees.insert(language.to_string(), tree);
        }
    }

    /// Snapshot of a stored tree, if any.
    pub fn get(&self, language: &str) -> Option<TranslationTree> {
        self.trees.lock().ok().and_then(|t| t.get(language).cloned())
    }
}

impl TreeStore for MemoryStore {
    fn load(&self, language: &str) -> Result<Option<TranslationTree>, Error> {
        Ok(self.get(language))
    }

    fn save(&self, language: &str, tree: &TranslationTree) -> Result<(), Error> {
        self.insert(language, tree.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> TranslationTree {
        value.as_object().expect("test fixture must be an object").clone()
    }

    #[test]
    fn test_fs_store_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        assert!(store.load("tr").unwrap().is_none());
    }

    #[test]
    fn test_fs_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let original = tree(json!({ "home": { "title": "Hoşgeldin" } }));
        store.save("tr", &original).unwrap();

        let loaded = store.load("tr").unwrap().unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_fs_store_saves_two_space_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.save("tr", &tree(json!({ "home": { "title": "Hoşgeldin" } }))).unwrap();

        let text = fs::read_to_string(store.resource_path("tr")).unwrap();
        assert!(text.contains("\n  \"home\": {"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_fs_store_load_corrupt_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        fs::write(store.resource_path("fr"), "{ not json").unwrap();

        let error = store.load("fr").unwrap_err();
        assert!(matches!(error, Error::Read { ref language, .. } if language == "fr"));
    }

    #[test]
    fn test_fs_store_load_non_object_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        fs::write(store.resource_path("fr"), "[1, 2]").unwrap();

        let error = store.load("fr").unwrap_err();
        assert!(error.to_string().contains("top-level object"));
    }

    #[test]
    fn test_fs_store_load_required_missing_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let error = store.load_required("en").unwrap_err();
        assert!(matches!(error, Error::Validation(_)));
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_fs_store_load_required_empty_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        fs::write(store.resource_path("en"), "").unwrap();

        let error = store.load_required("en").unwrap_err();
        assert!(error.to_string().contains("empty file"));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        let original = tree(json!({ "home": { "title": "Welcome" } }));
        store.save("en", &original).unwrap();
        assert_eq!(store.load("en").unwrap(), Some(original));
        assert_eq!(store.load("tr").unwrap(), None);
    }
}
