/*!
 * Concurrent enrichment of a word sample.
 *
 * Every sampled word gets its own lookup. Lookups run concurrently and each
 * one writes into the output slot matching its position in the sample, so
 * the result keeps the sample order whatever the completion order is. A
 * failing, empty, malformed or timed-out lookup only turns its own slot into
 * the error record.
 */

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::dictionary::{EnrichmentResult, MarkupNormalizer, RecordParser, WordDetail};
use crate::errors::LookupError;
use crate::providers::DictionarySource;

/// Options controlling lookup fan-out
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Maximum number of lookups in flight
    pub max_concurrent_lookups: usize,
    /// Upper bound for a single lookup
    pub lookup_timeout: Duration,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: 8,
            lookup_timeout: Duration::from_secs(10),
        }
    }
}

/// Drives the per-word lookups of one sample
#[derive(Debug, Clone)]
pub struct Enricher {
    /// Dictionary used for every lookup
    source: Arc<dyn DictionarySource>,
    /// Parser matching the source's entry shape
    parser: RecordParser,
    options: EnrichOptions,
}

impl Enricher {
    /// Create an enricher; the parser follows the source's entry shape
    pub fn new(
        source: Arc<dyn DictionarySource>,
        normalizer: Arc<MarkupNormalizer>,
        options: EnrichOptions,
    ) -> Self {
        let parser = RecordParser::new(source.entry_shape(), normalizer);
        Self {
            source,
            parser,
            options,
        }
    }

    /// Enricher with the built-in markup rules and default options
    pub fn with_source(source: Arc<dyn DictionarySource>) -> Self {
        Self::new(
            source,
            Arc::new(MarkupNormalizer::standard()),
            EnrichOptions::default(),
        )
    }

    pub fn options(&self) -> &EnrichOptions {
        &self.options
    }

    /// Enrich every word of `sample`, keeping its order and length
    pub async fn enrich(&self, sample: &[String]) -> EnrichmentResult {
        self.enrich_with_progress(sample, |_, _| {}).await
    }

    /// Enrich `sample`, calling `progress_callback(done, total)` as lookups finish
    pub async fn enrich_with_progress<F>(&self, sample: &[String], progress_callback: F) -> EnrichmentResult
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let total = sample.len();
        if total == 0 {
            return Vec::new();
        }

        let limit = self.options.max_concurrent_lookups.clamp(1, total);
        let completed = AtomicUsize::new(0);
        let completed = &completed;
        let progress_callback = &progress_callback;

        debug!("Enriching {} word(s), up to {} at a time", total, limit);

        let finished = stream::iter(sample.iter().enumerate())
            .map(move |(index, word)| async move {
                let detail = self.enrich_word(word).await;

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress_callback(done, total);

                (index, detail)
            })
            .buffer_unordered(limit)
            .collect::<Vec<_>>()
            .await;

        let mut slots: Vec<Option<WordDetail>> = vec![None; total];
        for (index, detail) in finished {
            slots[index] = Some(detail);
        }

        slots
            .into_iter()
            .zip(sample)
            .map(|(slot, word)| slot.unwrap_or_else(|| WordDetail::unavailable(word.as_str())))
            .collect()
    }

    /// Look up and parse a single word, absorbing every failure
    pub async fn enrich_word(&self, word: &str) -> WordDetail {
        let start_time = Instant::now();

        match self.lookup_and_parse(word).await {
            Ok(detail) => {
                debug!("Enriched '{}' in {:?}", word, start_time.elapsed());
                detail
            }
            Err(e @ LookupError::MalformedPayload { .. }) => {
                warn!("Discarding payload: {}", e);
                WordDetail::unavailable(word)
            }
            Err(e) => {
                warn!("{}", e);
                WordDetail::unavailable(word)
            }
        }
    }

    async fn lookup_and_parse(&self, word: &str) -> Result<WordDetail, LookupError> {
        let timeout = self.options.lookup_timeout;

        let entries = tokio::time::timeout(timeout, self.source.lookup(word))
            .await
            .map_err(|_| LookupError::TimedOut {
                word: word.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })??;

        self.parser.parse_lookup(word, &entries)
    }
}
