/*!
 * Dictionary payload handling.
 *
 * - `markup`: inline markup normalization for dictionary prose
 * - `decode`: tolerant traversal of loosely-typed JSON
 * - `record`: the normalized `WordDetail` record
 * - `parser`: raw entry to `WordDetail` mapping per dictionary shape
 */

pub use self::markup::{MarkupNormalizer, MarkupRule, MarkupRuleSpec, normalize};
pub use self::parser::{EntryShape, RecordParser};
pub use self::record::{
    DEFINITION_NOT_AVAILABLE, EnrichmentResult, NO_DEFINITION_TEXT, RawEntry, WordDetail,
};

pub mod decode;
pub mod markup;
pub mod parser;
pub mod record;
