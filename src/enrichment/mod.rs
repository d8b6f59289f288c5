/*!
 * Word enrichment.
 *
 * - `orchestrator`: concurrent per-word lookup and ordered aggregation
 * - `concurrency`: per-provider fan-out and timeout defaults
 */

pub use self::concurrency::ProviderProfile;
pub use self::orchestrator::{EnrichOptions, Enricher};

pub mod concurrency;
pub mod orchestrator;
