/*!
 * Normalized dictionary record.
 */

use serde::{Deserialize, Serialize};

/// Message stored in `WordDetail::error` when a word could not be enriched
pub const DEFINITION_NOT_AVAILABLE: &str = "Definition not available";

/// Placeholder for a sense whose text normalizes to nothing
pub const NO_DEFINITION_TEXT: &str = "No definition available";

/// Untransformed per-word payload from a dictionary source
pub type RawEntry = serde_json::Value;

/// Enriched words, one per sampled word and in sample order
pub type EnrichmentResult = Vec<WordDetail>;

/// Flat, normalized view of one dictionary entry.
///
/// `error` is set exactly when enrichment failed; in that case every other
/// field apart from `word` is absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDetail {
    pub word: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub short_definition: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub definitions: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_words: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WordDetail {
    /// Record carrying only the word, all descriptive fields empty
    pub fn bare(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }

    /// The single failure shape used for every per-word error
    pub fn unavailable(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            error: Some(DEFINITION_NOT_AVAILABLE.to_string()),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// True when no descriptive field is populated
    pub fn is_empty(&self) -> bool {
        self.phonetic.is_none()
            && self.origin.is_none()
            && self.part_of_speech.is_none()
            && self.short_definition.is_empty()
            && self.definitions.is_empty()
            && self.related_words.is_empty()
    }
}
