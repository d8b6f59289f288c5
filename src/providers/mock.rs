/*!
 * Mock source implementations for testing.
 *
 * This module provides in-process sources that simulate different behaviors:
 * - `MockDictionary::working()` - Always answers with a synthetic Collegiate entry
 * - `MockDictionary::failing()` - Always fails with a lookup error
 * - `MockDictionary::empty()` - Always answers with zero entries
 * - `MockWordList::with_words(..)` / `MockWordList::unavailable()` - Word list side
 */

use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::dictionary::{EntryShape, RawEntry};
use crate::errors::{LookupError, SourceError};
use crate::providers::{DictionarySource, WordListSource};

/// Behavior mode for the mock dictionary
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a synthetic entry
    Working,
    /// Always fails with an error
    Failing,
    /// Returns zero entries
    Empty,
    /// Returns a non-object entry
    Malformed,
    /// Succeeds after a delay (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock dictionary source with scripted per-word behavior
#[derive(Debug, Clone)]
pub struct MockDictionary {
    /// Behavior mode for words without a specific script
    behavior: MockBehavior,
    /// Words that always fail regardless of the behavior
    failing_words: HashSet<String>,
    /// Fixed payloads per word
    scripted: HashMap<String, Vec<RawEntry>>,
    /// Extra latency per word
    delays: HashMap<String, u64>,
    /// Total number of lookups served
    request_count: Arc<AtomicUsize>,
    /// Lookups currently running
    in_flight: Arc<AtomicUsize>,
    /// Highest number of simultaneous lookups observed
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockDictionary {
    /// Create a new mock dictionary with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            failing_words: HashSet::new(),
            scripted: HashMap::new(),
            delays: HashMap::new(),
            request_count: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Make lookups of `word` fail
    pub fn fail_for(mut self, word: impl Into<String>) -> Self {
        self.failing_words.insert(word.into());
        self
    }

    /// Answer lookups of `word` with `entries`
    pub fn with_entries(mut self, word: impl Into<String>, entries: Vec<RawEntry>) -> Self {
        self.scripted.insert(word.into(), entries);
        self
    }

    /// Delay lookups of `word` by `delay_ms`
    pub fn with_delay(mut self, word: impl Into<String>, delay_ms: u64) -> Self {
        self.delays.insert(word.into(), delay_ms);
        self
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Lookups started but not yet finished or dropped
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Synthetic Collegiate entry for `word`
    pub fn collegiate_entry(word: &str) -> RawEntry {
        json!({
            "meta": { "id": format!("{}:1", word) },
            "hwi": { "hw": word, "prs": [{ "mw": format!("ˈ{}", word) }] },
            "fl": "noun",
            "et": [["text", format!("Middle English {{it}}{}{{/it}}", word)]],
            "shortdef": [format!("a {} of some kind", word)],
            "def": [{
                "sseq": [[
                    ["sense", { "sn": "1", "dt": [["text", format!("{{bc}}a {} of some kind", word)]] }]
                ]]
            }],
            "uros": [{ "ure": format!("{}*like", word), "fl": "adjective" }]
        })
    }

    async fn answer(&self, word: &str) -> Result<Vec<RawEntry>, LookupError> {
        if let Some(delay_ms) = self.delays.get(word) {
            tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
        }

        if self.failing_words.contains(word) {
            return Err(LookupError::failed(word, "mock lookup failure"));
        }

        if let Some(entries) = self.scripted.get(word) {
            return Ok(entries.clone());
        }

        match self.behavior {
            MockBehavior::Working => Ok(vec![Self::collegiate_entry(word)]),
            MockBehavior::Failing => Err(LookupError::failed(word, "mock lookup failure")),
            MockBehavior::Empty => Ok(Vec::new()),
            MockBehavior::Malformed => Ok(vec![json!(42)]),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(vec![Self::collegiate_entry(word)])
            }
        }
    }
}

/// Decrements the in-flight counter when the lookup ends
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DictionarySource for MockDictionary {
    async fn lookup(&self, word: &str) -> Result<Vec<RawEntry>, LookupError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        // Also released when the caller drops the lookup on timeout
        let _in_flight = InFlightGuard(Arc::clone(&self.in_flight));

        self.answer(word).await
    }

    fn entry_shape(&self) -> EntryShape {
        EntryShape::Collegiate
    }
}

/// Mock word list source
#[derive(Debug, Clone)]
pub struct MockWordList {
    /// Words to serve, or `None` to simulate an unreachable source
    words: Option<Vec<String>>,
    /// Latency before answering
    delay_ms: u64,
    /// Total number of fetches served
    request_count: Arc<AtomicUsize>,
}

impl MockWordList {
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: Some(words.into_iter().map(Into::into).collect()),
            delay_ms: 0,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Pool of `count` generated words (`word0`, `word1`, ...)
    pub fn generated(count: usize) -> Self {
        Self::with_words((0..count).map(|i| format!("word{}", i)))
    }

    pub fn unavailable() -> Self {
        Self {
            words: None,
            delay_ms: 0,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WordListSource for MockWordList {
    async fn fetch_all(&self) -> Result<Vec<String>, SourceError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        self.words
            .clone()
            .ok_or_else(|| SourceError::Unavailable("mock word list unreachable".to_string()))
    }
}
