/*!
 * Provider-specific concurrency tuning.
 *
 * This module provides lookup concurrency and timeout defaults based on
 * dictionary provider characteristics such as quota and typical latency.
 */

use std::time::Duration;

use crate::app_config::DictionaryProvider;

/// Provider-specific lookup profile with tuned defaults
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// Maximum concurrent lookups
    pub max_concurrent_lookups: usize,
    /// Upper bound for a single lookup
    pub lookup_timeout: Duration,
}

impl ProviderProfile {
    /// Get the profile for a given provider
    pub fn for_provider(provider: DictionaryProvider) -> Self {
        match provider {
            DictionaryProvider::MerriamWebster => Self {
                max_concurrent_lookups: 8,
                lookup_timeout: Duration::from_secs(10),
            },
            DictionaryProvider::WordsApi => Self {
                // RapidAPI free plans throttle bursts
                max_concurrent_lookups: 5,
                lookup_timeout: Duration::from_secs(10),
            },
        }
    }

    /// Get effective concurrent lookups, respecting any user override
    pub fn effective_concurrent_lookups(&self, user_override: Option<usize>) -> usize {
        user_override
            .filter(|n| *n > 0)
            .unwrap_or(self.max_concurrent_lookups)
    }

    /// Get effective lookup timeout, respecting any user override
    pub fn effective_lookup_timeout(&self, user_override_secs: Option<u64>) -> Duration {
        user_override_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(self.lookup_timeout)
    }
}
