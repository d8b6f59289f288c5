use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::dictionary::{EntryShape, RawEntry};
use crate::errors::LookupError;
use crate::providers::DictionarySource;

/// Default Collegiate Dictionary endpoint
pub const DEFAULT_ENDPOINT: &str = "https://www.dictionaryapi.com/api/v3/references/collegiate/json";

/// Merriam-Webster client for the Collegiate Dictionary API
#[derive(Debug, Clone)]
pub struct MerriamWebster {
    /// HTTP client for API requests
    client: Client,
    /// API key passed as the `key` query parameter
    api_key: String,
    /// Base URL, the word is appended as a path segment
    endpoint: String,
}

impl MerriamWebster {
    /// Create a new client; an empty endpoint selects the public API
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint
            },
        }
    }

    /// Build the lookup URL for `word`
    pub fn lookup_url(&self, word: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| LookupError::failed(word, format!("invalid endpoint {}: {}", self.endpoint, e)))?;

        url.path_segments_mut()
            .map_err(|_| LookupError::failed(word, format!("endpoint {} cannot take a path", self.endpoint)))?
            .pop_if_empty()
            .push(word);
        url.query_pairs_mut().append_pair("key", &self.api_key);

        Ok(url)
    }

    /// Split a decoded body into entries.
    ///
    /// An array made only of strings is the API's "did you mean" answer for an
    /// unknown word and counts as no entries.
    pub fn decode_entries(word: &str, body: serde_json::Value) -> Result<Vec<RawEntry>, LookupError> {
        let entries = match body {
            serde_json::Value::Array(entries) => entries,
            other => {
                return Err(LookupError::malformed(
                    word,
                    format!("expected a JSON array, found {}", other),
                ));
            }
        };

        if entries.iter().all(|entry| entry.is_string()) {
            if !entries.is_empty() {
                debug!("No entry for '{}', {} suggestion(s) returned", word, entries.len());
            }
            return Ok(Vec::new());
        }

        Ok(entries)
    }
}

#[async_trait]
impl DictionarySource for MerriamWebster {
    async fn lookup(&self, word: &str) -> Result<Vec<RawEntry>, LookupError> {
        let url = self.lookup_url(word)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::failed(word, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Merriam-Webster API error for '{}' ({}): {}", word, status, error_text);
            return Err(LookupError::failed(word, format!("API error ({})", status)));
        }

        // Bad keys are answered with 200 and a plain-text body
        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| LookupError::failed(word, format!("failed to decode response: {}", e)))?;

        Self::decode_entries(word, body)
    }

    fn entry_shape(&self) -> EntryShape {
        EntryShape::Collegiate
    }
}
