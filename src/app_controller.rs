use anyhow::{Result, anyhow};
use log::{info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::app_config::{Config, DictionaryProvider, WordListKind};
use crate::dictionary::EnrichmentResult;
use crate::enrichment::Enricher;
use crate::errors::SourceError;
use crate::providers::merriam_webster::MerriamWebster;
use crate::providers::random_word::RandomWordApi;
use crate::providers::word_file::WordFile;
use crate::providers::words_api::WordsApi;
use crate::providers::{DictionarySource, WordListSource};
use crate::sampler;

// @module: Refresh workflow controller

/// Outcome of one refresh cycle
#[derive(Debug, Clone)]
pub struct RefreshReport {
    /// Sequence number of the refresh that produced this report
    pub ticket: u64,
    /// Words drawn from the pool, in draw order
    pub sample: Vec<String>,
    /// One record per sampled word, same order
    pub details: EnrichmentResult,
    /// A newer refresh started before this one finished; nothing was published
    pub superseded: bool,
}

impl RefreshReport {
    pub fn failed_count(&self) -> usize {
        self.details.iter().filter(|d| d.is_error()).count()
    }
}

/// Last state published to the presentation side
#[derive(Debug, Clone, Default)]
pub enum RefreshState {
    /// No refresh has completed yet
    #[default]
    Idle,
    /// Latest refresh produced a result
    Ready(RefreshReport),
    /// Latest refresh could not obtain the word list
    Failed(String),
}

/// Controller running refresh cycles: fetch pool, sample, enrich.
///
/// Refreshes may overlap. Only the most recently started one may publish its
/// outcome, so a slow older refresh never overwrites a newer state.
pub struct RefreshController {
    // @field: Candidate pool source
    word_list: Arc<dyn WordListSource>,
    // @field: Per-word enrichment
    enricher: Enricher,
    // @field: Words per refresh
    sample_size: usize,
    // @field: Ticket of the most recently started refresh
    generation: AtomicU64,
    // @field: Ticket and state last published
    published: Mutex<(u64, RefreshState)>,
}

impl RefreshController {
    /// Create a controller from already-built collaborators
    pub fn new(word_list: Arc<dyn WordListSource>, enricher: Enricher, sample_size: usize) -> Self {
        Self {
            word_list,
            enricher,
            sample_size,
            generation: AtomicU64::new(0),
            published: Mutex::new((0, RefreshState::Idle)),
        }
    }

    // @method: Build sources and enricher from the configuration
    pub fn with_config(config: &Config) -> Result<Self> {
        let api_key = config.dictionary.resolve_api_key().ok_or_else(|| {
            anyhow!(
                "No API key for {}; set dictionary.api_key or ${}",
                config.dictionary.provider.display_name(),
                config.dictionary.api_key_env
            )
        })?;

        let options = config.dictionary.enrich_options();
        let endpoint = config.dictionary.get_endpoint();

        let dictionary: Arc<dyn DictionarySource> = match config.dictionary.provider {
            DictionaryProvider::MerriamWebster => {
                Arc::new(MerriamWebster::new(api_key, endpoint, options.lookup_timeout))
            }
            DictionaryProvider::WordsApi => {
                Arc::new(WordsApi::new(api_key, endpoint, options.lookup_timeout))
            }
        };

        let word_list: Arc<dyn WordListSource> = match config.word_list.source {
            WordListKind::Http => Arc::new(RandomWordApi::new(
                config.word_list.endpoint.clone(),
                config.word_list.timeout(),
            )),
            WordListKind::File => {
                let path = config
                    .word_list
                    .path
                    .clone()
                    .ok_or_else(|| anyhow!("Word list path is required for the file source"))?;
                Arc::new(WordFile::new(path))
            }
        };

        let normalizer = Arc::new(config.markup.build_normalizer()?);
        let enricher = Enricher::new(dictionary, normalizer, options);

        Ok(Self::new(word_list, enricher, config.sample_size))
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Run one refresh cycle
    pub async fn refresh(&self) -> Result<RefreshReport, SourceError> {
        self.refresh_with_progress(|_, _| {}).await
    }

    /// Run one refresh cycle, reporting `(done, total)` lookups as they finish.
    ///
    /// A pool-level failure is returned as the error and no sample is drawn.
    /// Per-word failures are part of the report.
    pub async fn refresh_with_progress<F>(&self, progress_callback: F) -> Result<RefreshReport, SourceError>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let start_time = Instant::now();

        let pool = match self.word_list.fetch_all().await {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Refresh {} failed: {}", ticket, e);
                self.publish(ticket, RefreshState::Failed(e.to_string()));
                return Err(e);
            }
        };

        let sample = sampler::sample(&pool, self.sample_size);
        info!(
            "Refresh {}: sampled {} of {} candidate words",
            ticket,
            sample.len(),
            pool.len()
        );

        let details = self.enricher.enrich_with_progress(&sample, progress_callback).await;

        let mut report = RefreshReport {
            ticket,
            sample,
            details,
            superseded: false,
        };

        report.superseded = !self.publish(ticket, RefreshState::Ready(report.clone()));

        if report.superseded {
            info!("Refresh {} superseded by a newer request, result dropped", ticket);
        } else {
            info!(
                "Refresh {} completed in {:?} ({} of {} lookups failed)",
                ticket,
                start_time.elapsed(),
                report.failed_count(),
                report.details.len()
            );
        }

        Ok(report)
    }

    /// Last published state
    pub fn latest(&self) -> RefreshState {
        self.published.lock().1.clone()
    }

    /// Publish `state` unless a newer refresh has started. Returns whether it was stored.
    fn publish(&self, ticket: u64, state: RefreshState) -> bool {
        let mut published = self.published.lock();
        if ticket != self.generation.load(Ordering::SeqCst) || ticket < published.0 {
            return false;
        }
        *published = (ticket, state);
        true
    }
}
