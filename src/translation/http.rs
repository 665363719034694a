//! HTTP client for the public dictionary search API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::config::DictionarySettings;

use super::{Meaning, SourceError, Translation, TranslationSource};

const SEARCH_PATH: &str = "/api/public/v1/words/search";

/// Dictionary search client.
///
/// Issues `GET {base_url}/api/public/v1/words/search?search=<query>` and maps
/// the JSON answer onto [`Translation`] values.
pub struct DictionaryClient {
    client: Client,
    base_url: String,
}

impl DictionaryClient {
    /// Create a client from the `[dictionary]` config section.
    pub fn new(settings: &DictionarySettings) -> Result<Self, SourceError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_seconds))
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| SourceError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }
}

#[async_trait]
impl TranslationSource for DictionaryClient {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    async fn lookup(&self, query: &str) -> Result<Vec<Translation>, SourceError> {
        let url = Url::parse_with_params(&self.search_url(), &[("search", query)])
            .map_err(|e| SourceError::Transport(format!("Invalid search URL: {}", e)))?;
        tracing::debug!(url = %url, query = %query, "Sending dictionary search request");

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::warn!(status = %status, latency_ms, "Dictionary search failed");
            return Err(SourceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        let words = parse_search_response(&body)?;

        tracing::debug!(
            query = %query,
            latency_ms,
            words = words.len(),
            "Dictionary search completed"
        );
        Ok(words)
    }
}

#[derive(Debug, Deserialize)]
struct WordResponse {
    text: String,
    #[serde(default)]
    meanings: Vec<MeaningResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeaningResponse {
    translation: TranslationValue,
    #[serde(default)]
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct TranslationValue {
    text: String,
}

/// Parse a search response body into translations.
pub fn parse_search_response(body: &str) -> Result<Vec<Translation>, SourceError> {
    let words: Vec<WordResponse> = serde_json::from_str(body)
        .map_err(|e| SourceError::Decode(format!("Failed to parse response JSON: {}", e)))?;

    Ok(words
        .into_iter()
        .map(|word| Translation {
            original_text: word.text,
            meanings: word
                .meanings
                .into_iter()
                .map(|m| Meaning {
                    translated_text: m.translation.text,
                    image_url: absolute_image_url(&m.image_url),
                })
                .collect(),
        })
        .collect())
}

/// Image URLs come protocol-relative (`//cdn...`); pin them to https.
fn absolute_image_url(raw: &str) -> String {
    if raw.is_empty() || raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https:{}", raw)
    }
}
