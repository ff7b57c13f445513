//! All error types for the transfill crate.
//!
//! Structural errors (missing or corrupt resource files) abort a run early;
//! per-item provider errors are recovered locally by the pipeline and never
//! escalate past the affected key/language pair.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A resource file is missing, empty, or not a regular file when it is
    /// required to exist, or the configuration itself is unusable.
    #[error("validation error: {0}")]
    Validation(String),

    /// A target resource file exists but could not be parsed. Fatal for the
    /// whole run: partial reconciliation results would be misleading.
    #[error("failed to read `{language}` resource at {path:?}: {message}")]
    Read {
        language: String,
        path: PathBuf,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(serde_json::Error),

    /// A translation request failed for a reason that retrying will not fix.
    #[error("translation provider error: {0}")]
    Provider(String),

    /// The provider asked us to slow down (HTTP 429 or equivalent). The only
    /// error kind that [`crate::retry::RetryPolicy`] retries; surfacing it
    /// after retries means the attempt budget was exhausted while still
    /// rate-limited.
    #[error("rate limited by translation provider: {0}")]
    RateLimited(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Creates a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Creates a read error naming the offending language and file.
    pub fn read(
        language: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Error::Read {
            language: language.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this is the rate-limit signal that warrants a retry.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited(_))
    }
}
