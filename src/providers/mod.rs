/*!
 * Source implementations for the enrichment pipeline.
 *
 * This module contains client implementations for the two collaborators the
 * pipeline consumes:
 * - Word lists: `random_word` (HTTP JSON array) and `word_file` (local file)
 * - Dictionaries: `merriam_webster` (Collegiate API) and `words_api` (RapidAPI)
 * - `mock`: in-process sources with scripted behavior for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::dictionary::{EntryShape, RawEntry};
use crate::errors::{LookupError, SourceError};

/// Source of the candidate pool for one refresh
#[async_trait]
pub trait WordListSource: Send + Sync + Debug {
    /// Fetch every candidate word
    ///
    /// # Returns
    /// * `Result<Vec<String>, SourceError>` - The candidate pool, or why it is unavailable
    async fn fetch_all(&self) -> Result<Vec<String>, SourceError>;
}

/// Per-word dictionary lookup
///
/// Implementations return the raw entries untouched; decoding them is the
/// parser's job, driven by `entry_shape`.
#[async_trait]
pub trait DictionarySource: Send + Sync + Debug {
    /// Look up a single word
    ///
    /// # Arguments
    /// * `word` - The word to look up
    ///
    /// # Returns
    /// * `Result<Vec<RawEntry>, LookupError>` - Raw entries (possibly none), or the failure
    async fn lookup(&self, word: &str) -> Result<Vec<RawEntry>, LookupError>;

    /// Layout of the entries this source returns
    fn entry_shape(&self) -> EntryShape;
}

pub mod merriam_webster;
pub mod mock;
pub mod random_word;
pub mod word_file;
pub mod words_api;
