use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

use crate::dictionary::{EntryShape, RawEntry};
use crate::errors::LookupError;
use crate::providers::DictionarySource;

/// Default WordsAPI endpoint on RapidAPI
pub const DEFAULT_ENDPOINT: &str = "https://wordsapiv1.p.rapidapi.com/words";

/// WordsAPI client (RapidAPI marketplace)
#[derive(Debug, Clone)]
pub struct WordsApi {
    /// HTTP client for API requests
    client: Client,
    /// RapidAPI key
    api_key: String,
    /// Base URL, the word is appended as a path segment
    endpoint: String,
}

impl WordsApi {
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

    pub fn lookup_url(&self, word: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| LookupError::failed(word, format!("invalid endpoint {}: {}", self.endpoint, e)))?;

        url.path_segments_mut()
            .map_err(|_| LookupError::failed(word, format!("endpoint {} cannot take a path", self.endpoint)))?
            .pop_if_empty()
            .push(word);

        Ok(url)
    }

    /// Value for the `x-rapidapi-host` header
    pub fn rapidapi_host(&self) -> String {
        Url::parse(&self.endpoint)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| "wordsapiv1.p.rapidapi.com".to_string())
    }
}

#[async_trait]
impl DictionarySource for WordsApi {
    async fn lookup(&self, word: &str) -> Result<Vec<RawEntry>, LookupError> {
        let url = self.lookup_url(word)?;

        let response = self
            .client
            .get(url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", self.rapidapi_host())
            .send()
            .await
            .map_err(|e| LookupError::failed(word, format!("request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("WordsAPI has no entry for '{}'", word);
            return Ok(Vec::new());
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("WordsAPI error for '{}' ({}): {}", word, status, error_text);
            return Err(LookupError::failed(word, format!("API error ({})", status)));
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| LookupError::failed(word, format!("failed to decode response: {}", e)))?;

        Ok(vec![body])
    }

    fn entry_shape(&self) -> EntryShape {
        EntryShape::WordsApi
    }
}
