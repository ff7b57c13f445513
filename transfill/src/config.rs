//! Runtime configuration, loaded from the environment (with `.env` support).

use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

const DEFAULT_SOURCE_LANGUAGE: &str = "en";
const DEFAULT_TARGET_LANGUAGES: [&str; 3] = ["tr", "fr", "de"];
const DEFAULT_I18N_PATH: &str = "./src/messages";

/// Supported translation services.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    #[default]
    Google,
    Deepl,
    Openai,
    Gemini,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Google => "google",
            Service::Deepl => "deepl",
            Service::Openai => "openai",
            Service::Gemini => "gemini",
        }
    }
}

impl Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Service::Google),
            "deepl" => Ok(Service::Deepl),
            "openai" => Ok(Service::Openai),
            "gemini" => Ok(Service::Gemini),
            other => Err(Error::validation(format!(
                "unsupported translation service `{other}` (expected google, deepl, openai or gemini)"
            ))),
        }
    }
}

/// Tool configuration.
///
/// Loaded from `TRANSLATION_API_KEY`, `SOURCE_LANGUAGE`, `TARGET_LANGUAGES`
/// (comma-separated), `TRANSLATION_SERVICE` and `I18N_PATH`, after applying
/// any `.env` file in the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub source_language: String,
    pub target_languages: Vec<String>,
    pub translation_service: Service,
    pub i18n_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_languages: DEFAULT_TARGET_LANGUAGES
                .iter()
                .map(|l| l.to_string())
                .collect(),
            translation_service: Service::default(),
            i18n_path: PathBuf::from(DEFAULT_I18N_PATH),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment, creating a default
    /// `.env` template first if none exists.
    pub fn load() -> Result<Self, Error> {
        if !Path::new(".env").exists() {
            tracing::warn!(".env file not found, writing default template");
            Config::default().write_env(Path::new(".env"))?;
        }
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Factored out of
    /// [`Config::load`] so parsing is testable without touching process
    /// globals.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let defaults = Config::default();

        let target_languages = match lookup("TARGET_LANGUAGES") {
            Some(raw) => {
                let parsed = parse_language_list(&raw);
                if parsed.is_empty() {
                    return Err(Error::validation(
                        "TARGET_LANGUAGES must contain at least one language code",
                    ));
                }
                parsed
            }
            None => defaults.target_languages,
        };

        let translation_service = match lookup("TRANSLATION_SERVICE") {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => defaults.translation_service,
        };

        Ok(Config {
            api_key: lookup("TRANSLATION_API_KEY").unwrap_or_default(),
            source_language: lookup("SOURCE_LANGUAGE")
                .filter(|l| !l.trim().is_empty())
                .map(|l| l.trim().to_string())
                .unwrap_or(defaults.source_language),
            target_languages,
            translation_service,
            i18n_path: lookup("I18N_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.i18n_path),
        })
    }

    /// The provider abstraction needs a key; plain reconciliation does not.
    pub fn require_api_key(&self) -> Result<(), Error> {
        if self.api_key.trim().is_empty() {
            return Err(Error::validation(
                "API key is required (set TRANSLATION_API_KEY)",
            ));
        }
        Ok(())
    }

    /// Path of the source language's resource file.
    pub fn source_file(&self) -> PathBuf {
        self.i18n_path
            .join(format!("{}.json", self.source_language))
    }

    /// Serializes this config in `.env` format.
    pub fn env_contents(&self) -> String {
        format!(
            "TRANSLATION_API_KEY={}\n\
             SOURCE_LANGUAGE={}\n\
             TARGET_LANGUAGES={}\n\
             TRANSLATION_SERVICE={}\n\
             I18N_PATH={}\n",
            self.api_key,
            self.source_language,
            self.target_languages.join(","),
            self.translation_service,
            self.i18n_path.display(),
        )
    }

    /// Writes this config as a `.env` file.
    pub fn write_env(&self, path: &Path) -> Result<(), Error> {
        std::fs::write(path, self.env_contents())?;
        Ok(())
    }
}

/// Splits a comma-separated language list, dropping empty items.
pub fn parse_language_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
