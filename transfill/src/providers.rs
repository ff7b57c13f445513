//! The translation provider abstraction and its HTTP implementations.
//!
//! Every supported service boils down to one POST request per text;
//! [`HttpTranslator`] owns that request and response shape per service,
//! while retry pacing and batching live in [`crate::retry`] and
//! [`crate::batch`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    config::{Config, Service},
    error::Error,
};

const GOOGLE_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";
const DEEPL_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";
const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1/models/gemini-pro:generateText";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A source of translations for single texts.
///
/// Implementations perform the actual work, whether through a provider API
/// or deterministic test logic. A rate-limit response must surface as
/// [`Error::RateLimited`] so the retry layer can react to it; any other
/// failure is terminal for the call.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates one text into `target_language`.
    ///
    /// An `Ok` carrying an empty string means the provider produced no
    /// usable translation; callers treat it the same as a failure.
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, Error>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// HTTP-backed translator dispatching on the configured service.
#[derive(Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    service: Service,
    api_key: String,
    source_language: String,
}

impl HttpTranslator {
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.require_api_key()?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(HttpTranslator {
            client,
            service: config.translation_service,
            api_key: config.api_key.clone(),
            source_language: config.source_language.clone(),
        })
    }

    async fn google(&self, text: &str, target_language: &str) -> Result<String, Error> {
        let url = format!("{GOOGLE_ENDPOINT}?key={}", self.api_key);
        let body = json!({
            "q": text,
            "target": target_language,
            "source": self.source_language,
        });
        let response = self.client.post(&url).json(&body).send().await?;
        let payload = check_status(response).await?;
        Ok(text_at(&payload, "/data/translations/0/translatedText"))
    }

    async fn deepl(&self, text: &str, target_language: &str) -> Result<String, Error> {
        let body = json!({
            "text": [text],
            "target_lang": target_language.to_uppercase(),
            "source_lang": self.source_language.to_uppercase(),
        });
        let response = self
            .client
            .post(DEEPL_ENDPOINT)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&body)
            .send()
            .await?;
        let payload = check_status(response).await?;
        Ok(text_at(&payload, "/translations/0/text"))
    }

    async fn openai(&self, text: &str, target_language: &str) -> Result<String, Error> {
        let body = json!({
            "model": "gpt-4",
            "messages": [
                {
                    "role": "system",
                    "content": format!(
                        "You are a professional translator. Translate the following text to {target_language}:"
                    ),
                },
                { "role": "user", "content": text },
            ],
            "max_tokens": 100,
        });
        let response = self
            .client
            .post(OPENAI_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let payload = check_status(response).await?;
        Ok(text_at(&payload, "/choices/0/message/content").trim().to_string())
    }

    async fn gemini(&self, text: &str, target_language: &str) -> Result<String, Error> {
        let body = json!({
            "prompt": {
                "text": format!("Translate the following text to {target_language}: \"{text}\""),
            },
            "max_output_tokens": 100,
        });
        let response = self
            .client
            .post(GEMINI_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let payload = check_status(response).await?;
        Ok(text_at(&payload, "/candidates/0/output").trim().to_string())
    }
}

impl std::fmt::Debug for HttpTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTranslator")
            .field("service", &self.service)
            .field("api_key", &"***")
            .field("source_language", &self.source_language)
            .finish()
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, Error> {
        if text.is_empty() {
            return Ok(String::new());
        }
        match self.service {
            Service::Google => self.google(text, target_language).await,
            Service::Deepl => self.deepl(text, target_language).await,
            Service::Openai => self.openai(text, target_language).await,
            Service::Gemini => self.gemini(text, target_language).await,
        }
    }

    fn name(&self) -> &str {
        self.service.as_str()
    }
}

/// Maps HTTP status to the error taxonomy and parses the JSON payload.
/// 429 is the retryable rate-limit signal; every other non-success status is
/// a terminal provider error.
async fn check_status(response: reqwest::Response) -> Result<Value, Error> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::RateLimited(format!("{status}: {body}")));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Provider(format!("{status}: {body}")));
    }
    Ok(response.json().await?)
}

/// String at a JSON pointer, or empty when the response shape is off.
/// Mirrors the lenient extraction the services' ad-hoc payloads require;
/// downstream treats empty as "no translation produced".
fn text_at(payload: &Value, pointer: &str) -> String {
    payload
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
