use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use std::time::Duration;

use crate::dictionary::{MarkupNormalizer, MarkupRuleSpec};
use crate::enrichment::{EnrichOptions, ProviderProfile};
use crate::sampler::DEFAULT_SAMPLE_SIZE;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Number of words drawn per refresh
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Word list source config
    #[serde(default)]
    pub word_list: WordListConfig,

    /// Dictionary source config
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Markup normalization config
    #[serde(default)]
    pub markup: MarkupConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Dictionary provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryProvider {
    // @provider: Merriam-Webster Collegiate
    #[default]
    MerriamWebster,
    // @provider: WordsAPI on RapidAPI
    WordsApi,
}

impl DictionaryProvider {
    // @returns: Human readable provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::MerriamWebster => "Merriam-Webster",
            Self::WordsApi => "WordsAPI",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::MerriamWebster => "merriamwebster".to_string(),
            Self::WordsApi => "wordsapi".to_string(),
        }
    }

    // @returns: Endpoint used when none is configured
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::MerriamWebster => crate::providers::merriam_webster::DEFAULT_ENDPOINT,
            Self::WordsApi => crate::providers::words_api::DEFAULT_ENDPOINT,
        }
    }
}

// Implement Display trait for DictionaryProvider
impl std::fmt::Display for DictionaryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for DictionaryProvider
impl std::str::FromStr for DictionaryProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "merriamwebster" | "mw" => Ok(Self::MerriamWebster),
            "wordsapi" => Ok(Self::WordsApi),
            _ => Err(anyhow!("Invalid dictionary provider: {}", s)),
        }
    }
}

/// Where the candidate pool comes from
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WordListKind {
    /// JSON array served over HTTP
    #[default]
    Http,
    /// Local newline-separated file
    File,
}

/// Word list source configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WordListConfig {
    /// Source kind
    #[serde(default)]
    pub source: WordListKind,

    /// URL of the word list (http source)
    #[serde(default = "default_word_list_endpoint")]
    pub endpoint: String,

    /// Path of the word file (file source)
    #[serde(default)]
    pub path: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WordListConfig {
    fn default() -> Self {
        Self {
            source: WordListKind::default(),
            endpoint: default_word_list_endpoint(),
            path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WordListConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Dictionary service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DictionaryConfig {
    /// Dictionary provider to use
    #[serde(default)]
    pub provider: DictionaryProvider,

    /// API key; when empty the key is read from `api_key_env`
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Service endpoint URL, empty for the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Per-lookup timeout in seconds, provider default when unset
    #[serde(default)]
    pub lookup_timeout_secs: Option<u64>,

    /// Maximum concurrent lookups, provider default when unset
    #[serde(default)]
    pub concurrent_requests: Option<usize>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            provider: DictionaryProvider::default(),
            api_key: String::new(),
            api_key_env: default_api_key_env(),
            endpoint: String::new(),
            lookup_timeout_secs: None,
            concurrent_requests: None,
        }
    }
}

impl DictionaryConfig {
    /// Configured key, else the value of the configured environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.trim().to_string());
        }

        if self.api_key_env.is_empty() {
            return None;
        }

        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }
        self.provider.default_endpoint().to_string()
    }

    /// Fan-out and timeout settings for the active provider
    pub fn enrich_options(&self) -> EnrichOptions {
        let profile = ProviderProfile::for_provider(self.provider);
        EnrichOptions {
            max_concurrent_lookups: profile.effective_concurrent_lookups(self.concurrent_requests),
            lookup_timeout: profile.effective_lookup_timeout(self.lookup_timeout_secs),
        }
    }
}

/// Markup normalization settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MarkupConfig {
    /// Rules applied after the built-in ones
    #[serde(default)]
    pub extra_rules: Vec<MarkupRuleSpec>,
}

impl MarkupConfig {
    pub fn build_normalizer(&self) -> Result<MarkupNormalizer> {
        MarkupNormalizer::with_extra_rules(&self.extra_rules)
            .context("Invalid markup rule pattern")
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_word_list_endpoint() -> String {
    crate::providers::random_word::DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    "WORDWELL_API_KEY".to_string()
}

impl Config {
    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to open config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.dictionary.resolve_api_key().is_none() {
            return Err(anyhow!(
                "Dictionary API key is required for {} (set dictionary.api_key or ${})",
                self.dictionary.provider.display_name(),
                self.dictionary.api_key_env
            ));
        }

        match self.word_list.source {
            WordListKind::Http => {
                if self.word_list.endpoint.trim().is_empty() {
                    return Err(anyhow!("Word list endpoint is required for the http source"));
                }
            }
            WordListKind::File => {
                let has_path = self
                    .word_list
                    .path
                    .as_deref()
                    .is_some_and(|p| !p.trim().is_empty());
                if !has_path {
                    return Err(anyhow!("Word list path is required for the file source"));
                }
            }
        }

        url::Url::parse(&self.dictionary.get_endpoint())
            .context("Dictionary endpoint is not a valid URL")?;

        self.markup.build_normalizer()?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            sample_size: default_sample_size(),
            word_list: WordListConfig::default(),
            dictionary: DictionaryConfig::default(),
            markup: MarkupConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
