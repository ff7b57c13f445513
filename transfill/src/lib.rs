#![forbid(unsafe_code)]
//! Missing-translation detection and auto-fill for nested JSON i18n resources.
//!
//! Given a directory of per-language resource files (`en.json`, `tr.json`,
//! ...), transfill flattens each nested tree into dotted-path keys, diffs the
//! targets against the source language, and can fill the gaps by calling a
//! translation service with rate-limit-aware retries and paced batches.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use transfill::{Config, FsStore, HttpTranslator, RetryPolicy, TreeStore};
//!
//! # async fn run() -> Result<(), transfill::Error> {
//! let config = Config::load()?;
//! let store = FsStore::new(&config.i18n_path);
//!
//! // Report which keys are missing in which target languages.
//! let source = store.load_required(&config.source_language)?;
//! let missing = transfill::check_translations(&source, &config.target_languages, &store)?;
//!
//! // Fill the gaps via the configured provider.
//! let translator = HttpTranslator::new(&config)?;
//! let report = transfill::fix_translations(
//!     &config,
//!     &translator,
//!     &store,
//!     &RetryPolicy::default(),
//!     |event| eprintln!("{}/{} {}", event.completed, event.total, event.current_key),
//! )
//! .await?;
//! println!("translated {} entries", report.translated.len());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod flatten;
pub mod pipeline;
pub mod providers;
pub mod reconcile;
pub mod retry;
pub mod sanitize;
pub mod store;
pub mod types;

// Re-export most used items for easy consumption
pub use crate::{
    batch::BatchOptions,
    config::{Config, Service},
    error::Error,
    flatten::{flatten, set_nested},
    pipeline::{FixReport, TranslatedItem, fix_translations},
    providers::{HttpTranslator, Translator},
    reconcile::check_translations,
    retry::RetryPolicy,
    sanitize::sanitize,
    store::{FsStore, MemoryStore, TreeStore},
    types::{BatchResult, FlatKey, MissingEntry, ProgressEvent, TranslationTree},
};
