use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use std::time::Duration;

use crate::errors::SourceError;
use crate::providers::WordListSource;

/// Default endpoint returning every known word as a JSON array
pub const DEFAULT_ENDPOINT: &str = "https://random-word-api.herokuapp.com/all";

/// Word list client for a JSON `["word", ...]` endpoint
#[derive(Debug, Clone)]
pub struct RandomWordApi {
    /// HTTP client for API requests
    client: Client,
    /// Full URL of the word list
    endpoint: String,
}

impl RandomWordApi {
    /// Create a new client; an empty endpoint selects the public service
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint
            },
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Turn a decoded body into the candidate pool
    pub fn decode_pool(body: serde_json::Value) -> Result<Vec<String>, SourceError> {
        let items = match body {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(SourceError::ParseError(format!(
                    "expected a JSON array of words, found {}",
                    other
                )));
            }
        };

        Ok(items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(word) => Some(word.trim().to_string()),
                _ => None,
            })
            .filter(|word| !word.is_empty())
            .collect())
    }
}

#[async_trait]
impl WordListSource for RandomWordApi {
    async fn fetch_all(&self) -> Result<Vec<String>, SourceError> {
        debug!("Fetching word list from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(format!("{}: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Word list API error ({}): {}", status, error_text);
            return Err(SourceError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| SourceError::ParseError(e.to_string()))?;

        let pool = Self::decode_pool(body)?;
        debug!("Word list holds {} candidates", pool.len());
        Ok(pool)
    }
}
