/*!
 * Glossary enrichment pipeline.
 *
 * This module contains the compilation core:
 * - `enrichment::queue`: the durable list of words pending enrichment
 * - `enrichment::orchestrator`: per-word fan-out, completion tracking, and
 *   the combine step
 * - `enrichment::parser`: example and genus extraction from scraped content
 * - `enrichment::cache`: in-memory cache in front of the translation adapter
 * - `enrichment::dataset`: consolidation, persistence, and spreadsheet
 *   writeback of finalized entries
 */

pub mod queue;
pub mod orchestrator;
pub mod parser;
pub mod cache;
pub mod dataset;

// Re-export main types for easier usage
pub use queue::{QueueEntry, WorkQueue};
pub use orchestrator::{EnrichmentResult, Orchestrator};
pub use dataset::{DatasetWriter, DictionaryEntry, WordMetadata};
