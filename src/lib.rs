/*!
 * # wortfluss
 *
 * A Rust library and CLI for compiling a vocabulary glossary: given a word
 * list from a spreadsheet, it enriches each word with a machine translation,
 * usage examples, and grammatical metadata, then persists the consolidated
 * dataset and writes definitions back to the spreadsheet.
 *
 * ## Features
 *
 * - Concurrent per-word enrichment fan-out over an arbitrary-size queue
 * - Independent scrape and translate sub-tasks racing to a single combine step
 * - Timeout-bounded example translation that drops slow examples, not words
 * - Failure isolation: a word that cannot be enriched is recorded for manual
 *   correction without aborting the run
 * - Durable queue and dataset files, so interrupted runs resume
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `glossary`: Glossary row model and per-row word resolution
 * - `enrichment`: The compilation core:
 *   - `enrichment::queue`: Durable pending-work queue
 *   - `enrichment::orchestrator`: Per-word fan-out and completion tracking
 *   - `enrichment::parser`: Example and genus extraction
 *   - `enrichment::cache`: Translation caching
 *   - `enrichment::dataset`: Consolidation and writeback
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Clients for the external collaborators:
 *   - `providers::deepl`: DeepL translation API client
 *   - `providers::dwds`: DWDS dictionary scraper
 *   - `providers::sheets`: Spreadsheet store client
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
pub mod enrichment;
pub mod errors;
pub mod file_utils;
pub mod glossary;
pub mod language_utils;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use enrichment::{DatasetWriter, DictionaryEntry, EnrichmentResult, Orchestrator, WorkQueue};
pub use glossary::{Direction, GlossaryRow};
pub use errors::{AppError, GlossaryError, ProviderError};
