/*!
 * Adapter interfaces for the pipeline's external collaborators.
 *
 * This module defines the traits the enrichment core needs from the outside
 * world, plus the client implementations:
 * - DeepL: machine translation provider
 * - DWDS: definition/example source (dictionary scraper)
 * - Sheets: spreadsheet store supplying the word list and accepting writebacks
 *
 * Adapters are constructed once and passed by reference into the
 * orchestrator, so tests can substitute deterministic fakes.
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::PathBuf;

use crate::errors::ProviderError;
use crate::glossary::{Direction, GlossaryRow};

/// Machine translation provider
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate a piece of text in the given direction
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `direction` - Which way through the configured language pair
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str, direction: Direction) -> Result<String, ProviderError>;

    /// One-line summary of calls made so far, for the end-of-run log
    fn call_summary(&self) -> String {
        String::new()
    }
}

/// Definition/example source
///
/// Lookups are idempotent and cacheable by word: a successful lookup yields
/// a reference to the raw scraped content on disk, and repeating it returns
/// the same reference without re-fetching.
#[async_trait]
pub trait DefinitionSource: Send + Sync + Debug {
    /// Fetch the raw content for a word
    ///
    /// # Returns
    /// * `Ok(Some(path))` - Reference to the scraped content
    /// * `Ok(None)` - The source has no usable entry for this word
    /// * `Err(_)` - The source could not be reached
    async fn lookup(&self, word: &str) -> Result<Option<PathBuf>, ProviderError>;
}

/// A single cell update for the spreadsheet writeback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    /// Target cell in A1 notation (e.g. "C2")
    pub range: String,
    /// New cell value
    pub value: String,
}

/// Spreadsheet store: supplies the initial word list and accepts batched
/// cell updates
#[async_trait]
pub trait SpreadsheetStore: Send + Sync + Debug {
    /// Fetch all glossary rows, header row already skipped
    async fn fetch_rows(&self) -> Result<Vec<GlossaryRow>, ProviderError>;

    /// Apply a batch of cell updates in one call
    async fn batch_update(&self, updates: &[CellUpdate]) -> Result<(), ProviderError>;
}

/// Convert a (1-based row, 1-based column) pair to A1 notation
pub fn rowcol_to_a1(row: usize, col: usize) -> String {
    let mut letters = String::new();
    let mut col = col;
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    format!("{}{}", letters, row)
}

pub mod deepl;
pub mod dwds;
pub mod sheets;
