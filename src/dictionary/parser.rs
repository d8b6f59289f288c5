/*!
 * Dictionary record parser.
 *
 * Maps a raw per-word payload into a `WordDetail`. Each field is extracted
 * independently through the tolerant decoder, so a missing or oddly-shaped
 * field only empties that field and never aborts the rest of the record.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::LookupError;

use super::decode::Node;
use super::markup::MarkupNormalizer;
use super::record::{NO_DEFINITION_TEXT, RawEntry, WordDetail};

/// Separator placed between the text items of one sense
const SENSE_SEPARATOR: &str = " ";

/// Number of WordsAPI definitions promoted to the short definition list
const WORDS_API_SHORT_DEFINITIONS: usize = 3;

/// Payload layout of the dictionary source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryShape {
    /// Merriam-Webster Collegiate entries (`meta`, `hwi`, `def.sseq`, ...)
    #[default]
    Collegiate,
    /// WordsAPI objects (`word`, `pronunciation`, `results[]`)
    WordsApi,
}

/// Parser turning raw entries into normalized records
#[derive(Debug, Clone)]
pub struct RecordParser {
    normalizer: Arc<MarkupNormalizer>,
    shape: EntryShape,
}

impl RecordParser {
    pub fn new(shape: EntryShape, normalizer: Arc<MarkupNormalizer>) -> Self {
        Self { normalizer, shape }
    }

    /// Parser for `shape` using the built-in markup rules
    pub fn with_shape(shape: EntryShape) -> Self {
        Self::new(shape, Arc::new(MarkupNormalizer::standard()))
    }

    pub fn shape(&self) -> EntryShape {
        self.shape
    }

    /// Parse a single raw entry. Never fails: anything missing stays empty.
    pub fn parse(&self, raw: &RawEntry, fallback_word: &str) -> WordDetail {
        let entry = Node::new(raw);
        match self.shape {
            EntryShape::Collegiate => self.parse_collegiate(entry, fallback_word),
            EntryShape::WordsApi => self.parse_words_api(entry, fallback_word),
        }
    }

    /// Parse the full list of entries returned for `word`.
    ///
    /// Zero entries or a first entry that is not an object are reported as
    /// errors so the caller can log them and fall back to the single failure
    /// record.
    pub fn parse_lookup(&self, word: &str, entries: &[RawEntry]) -> Result<WordDetail, LookupError> {
        let first = entries
            .first()
            .ok_or_else(|| LookupError::failed(word, "no dictionary entries returned"))?;

        if !first.is_object() {
            return Err(LookupError::malformed(
                word,
                format!("expected an entry object, found {}", json_kind(first)),
            ));
        }

        debug!("Parsing {} entr(y/ies) for '{}'", entries.len(), word);
        Ok(self.parse(first, word))
    }

    fn normalize_all<'a>(&self, texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        texts
            .into_iter()
            .map(|text| self.normalizer.normalize(text))
            .filter(|text| !text.is_empty())
            .collect()
    }

    fn parse_collegiate(&self, entry: Node<'_>, fallback_word: &str) -> WordDetail {
        WordDetail {
            word: collegiate_headword(entry).unwrap_or_else(|| fallback_word.to_string()),
            phonetic: entry
                .get("hwi")
                .get("prs")
                .at(0)
                .get("mw")
                .text()
                .map(str::to_string),
            origin: self.collegiate_origin(entry),
            part_of_speech: entry.get("fl").text().map(str::to_string),
            short_definition: self.normalize_all(entry.get("shortdef").strings()),
            definitions: self.collegiate_definitions(entry),
            related_words: entry
                .get("uros")
                .items()
                .filter_map(|uro| uro.get("ure").text())
                .map(strip_syllable_marks)
                .collect(),
            error: None,
        }
    }

    fn collegiate_origin(&self, entry: Node<'_>) -> Option<String> {
        entry
            .get("et")
            .items()
            .find_map(|item| match item.tagged() {
                Some(("text", body)) => body.text(),
                _ => None,
            })
            .map(|text| self.normalizer.normalize(text))
            .filter(|text| !text.is_empty())
    }

    fn collegiate_definitions(&self, entry: Node<'_>) -> Vec<String> {
        let mut senses = Vec::new();
        for block in entry.get("def").items() {
            for sequence in block.get("sseq").items() {
                for item in sequence.items() {
                    collect_senses(item, &mut senses);
                }
            }
        }

        senses
            .iter()
            .filter_map(|texts| self.render_sense(texts))
            .collect()
    }

    fn render_sense(&self, texts: &[&str]) -> Option<String> {
        if texts.is_empty() {
            return None;
        }

        let text = self.normalizer.normalize(&texts.join(SENSE_SEPARATOR));
        if text.is_empty() {
            Some(NO_DEFINITION_TEXT.to_string())
        } else {
            Some(text)
        }
    }

    fn parse_words_api(&self, entry: Node<'_>, fallback_word: &str) -> WordDetail {
        // `/words/{w}` answers with `results`, `/words/{w}/definitions` with `definitions`
        let results: Vec<Node<'_>> = entry
            .get("results")
            .items()
            .chain(entry.get("definitions").items())
            .collect();

        let definitions = self.normalize_all(results.iter().filter_map(|r| r.get("definition").text()));

        let mut related_words: Vec<String> = Vec::new();
        for synonym in results.iter().flat_map(|r| r.get("synonyms").strings()) {
            if !related_words.iter().any(|known| known == synonym) {
                related_words.push(synonym.to_string());
            }
        }

        let pronunciation = entry.get("pronunciation");

        WordDetail {
            word: entry
                .get("word")
                .text()
                .map(str::to_string)
                .unwrap_or_else(|| fallback_word.to_string()),
            phonetic: pronunciation
                .get("all")
                .text()
                .or_else(|| pronunciation.text())
                .map(str::to_string),
            origin: None,
            part_of_speech: results
                .first()
                .and_then(|r| r.get("partOfSpeech").text())
                .map(str::to_string),
            short_definition: definitions
                .iter()
                .take(WORDS_API_SHORT_DEFINITIONS)
                .cloned()
                .collect(),
            definitions,
            related_words,
            error: None,
        }
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::with_shape(EntryShape::default())
    }
}

/// Walk one sense-sequence item, pushing the text items of every sense found
fn collect_senses<'a>(item: Node<'a>, out: &mut Vec<Vec<&'a str>>) {
    let Some((tag, body)) = item.tagged() else {
        return;
    };

    match tag {
        "sense" => push_sense(body, out),
        "bs" => push_sense(body.get("sense"), out),
        "pseq" => {
            for nested in body.items() {
                collect_senses(nested, out);
            }
        }
        // "sen" and friends carry labels only
        _ => {}
    }
}

/// Push a sense and, right after it, its divided sub-sense
fn push_sense<'a>(sense: Node<'a>, out: &mut Vec<Vec<&'a str>>) {
    out.push(text_items(sense.get("dt")));

    let divided = sense.get("sdsense");
    if divided.is_present() {
        out.push(text_items(divided.get("dt")));
    }
}

fn text_items<'a>(dt: Node<'a>) -> Vec<&'a str> {
    dt.items()
        .filter_map(|item| match item.tagged() {
            Some(("text", body)) => body.as_str(),
            _ => None,
        })
        .collect()
}

/// `meta.id` without its homograph suffix, else the headword
fn collegiate_headword(entry: Node<'_>) -> Option<String> {
    if let Some(id) = entry.get("meta").get("id").text() {
        let id = match id.rsplit_once(':') {
            Some((stem, suffix)) if suffix.chars().all(|c| c.is_ascii_digit()) => stem,
            _ => id,
        };
        return Some(id.to_string());
    }

    entry.get("hwi").get("hw").text().map(strip_syllable_marks)
}

fn strip_syllable_marks(text: &str) -> String {
    text.replace('*', "")
}

fn json_kind(value: &RawEntry) -> &'static str {
    match value {
        RawEntry::Null => "null",
        RawEntry::Bool(_) => "a boolean",
        RawEntry::Number(_) => "a number",
        RawEntry::String(_) => "a string",
        RawEntry::Array(_) => "an array",
        RawEntry::Object(_) => "an object",
    }
}
