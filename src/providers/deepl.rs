use async_trait::async_trait;
use log::{debug, error};
use parking_lot::Mutex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::glossary::Direction;
use crate::language_utils::LanguagePair;
use crate::providers::Translator;

/// DeepL client for interacting with the DeepL translation API
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
    /// Configured language pair
    languages: LanguagePair,
    /// Per-direction call accounting
    stats: Mutex<CallStats>,
}

/// Per-direction call and character counts
#[derive(Debug, Default, Clone)]
struct CallStats {
    forward_calls: usize,
    forward_chars: usize,
    reverse_calls: usize,
    reverse_chars: usize,
}

/// DeepL translation request
#[derive(Debug, Serialize)]
struct TranslateRequest {
    /// Texts to translate (one per request in this pipeline)
    text: Vec<String>,

    /// Source language code, uppercased
    source_lang: String,

    /// Target language code, uppercased
    target_lang: String,
}

/// DeepL translation response
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    /// One entry per requested text
    translations: Vec<Translation>,
}

/// Individual translation in a DeepL response
#[derive(Debug, Deserialize)]
struct Translation {
    /// The translated text
    text: String,
}

impl DeepL {
    /// Create a new DeepL client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        languages: LanguagePair,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            languages,
            stats: Mutex::new(CallStats::default()),
        }
    }

    /// Map an ISO 639-1 code to the form DeepL expects.
    ///
    /// DeepL deprecated the bare "en" target in favor of regional variants.
    fn deepl_code(code: &str, is_target: bool) -> String {
        let upper = code.to_uppercase();
        if is_target && upper == "EN" {
            "EN-US".to_string()
        } else {
            upper
        }
    }

    fn record_call(&self, direction: Direction, chars: usize) {
        let mut stats = self.stats.lock();
        match direction {
            Direction::SourceToTarget => {
                stats.forward_calls += 1;
                stats.forward_chars += chars;
            }
            Direction::TargetToSource => {
                stats.reverse_calls += 1;
                stats.reverse_chars += chars;
            }
        }
    }
}

impl std::fmt::Debug for DeepL {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepL")
            .field("endpoint", &self.endpoint)
            .field("languages", &self.languages)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Translator for DeepL {
    async fn translate(&self, text: &str, direction: Direction) -> Result<String, ProviderError> {
        let (from, to) = self.languages.codes_for(direction);

        let request = TranslateRequest {
            text: vec![text.to_string()],
            source_lang: Self::deepl_code(from, false),
            target_lang: Self::deepl_code(to, true),
        };

        let api_url = format!("{}/v2/translate", self.endpoint.trim_end_matches('/'));

        let response = self.client.post(&api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(
                format!("Failed to send request to DeepL API: {}", e)
            ))?;

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::AuthenticationError(
                "DeepL API rejected the configured key".to_string()
            ));
        }
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let translate_response = response.json::<TranslateResponse>().await
            .map_err(|e| ProviderError::ParseError(
                format!("Failed to parse DeepL API response: {}", e)
            ))?;

        let translated = translate_response.translations.into_iter().next()
            .map(|t| t.text)
            .ok_or_else(|| ProviderError::ParseError(
                "DeepL returned no translations".to_string()
            ))?;

        self.record_call(direction, text.chars().count());
        debug!("Fetched translation {:?} for {:?}", translated, text);

        Ok(translated)
    }

    fn call_summary(&self) -> String {
        let stats = self.stats.lock().clone();
        format!(
            "{} -> {}: {} calls, {} chars | {} -> {}: {} calls, {} chars | total: {} calls, {} chars",
            self.languages.source, self.languages.target,
            stats.forward_calls, stats.forward_chars,
            self.languages.target, self.languages.source,
            stats.reverse_calls, stats.reverse_chars,
            stats.forward_calls + stats.reverse_calls,
            stats.forward_chars + stats.reverse_chars,
        )
    }
}
