/*!
 * # wordwell - random words with dictionary details
 *
 * A Rust library that samples a handful of random words from a word list
 * service and enriches each one with dictionary metadata.
 *
 * ## Features
 *
 * - Uniform random sampling without replacement (Fisher–Yates)
 * - Concurrent per-word dictionary lookups with per-word failure isolation
 * - Tolerant parsing of nested, markup-laden dictionary payloads:
 *   - Merriam-Webster Collegiate API
 *   - WordsAPI
 * - Configurable markup normalization rules
 * - Bounded lookups: a slow word times out on its own
 * - Last-request-wins refresh cycles
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `sampler`: Random word sampling
 * - `dictionary`: Payload handling:
 *   - `dictionary::markup`: Inline markup normalization
 *   - `dictionary::decode`: Tolerant JSON traversal
 *   - `dictionary::record`: The normalized `WordDetail` record
 *   - `dictionary::parser`: Raw entry to `WordDetail` mapping
 * - `enrichment`: Concurrent lookup orchestration
 * - `providers`: Word list and dictionary clients
 * - `app_controller`: Refresh workflow controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod dictionary;
pub mod enrichment;
pub mod errors;
pub mod providers;
pub mod sampler;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{RefreshController, RefreshReport, RefreshState};
pub use dictionary::{EnrichmentResult, WordDetail, normalize};
pub use enrichment::Enricher;
pub use errors::{AppError, LookupError, SourceError};
pub use sampler::sample;
