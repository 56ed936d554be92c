/*!
 * Glossary row model and per-row word resolution.
 *
 * The glossary source supplies ordered rows of (source word, target word,
 * existing definition), any of which may be empty. Each row resolves to at
 * most one word pending enrichment, tagged with its translation direction.
 */

use serde::{Deserialize, Serialize};

use crate::errors::GlossaryError;

/// Which language a word originates in, determining whether translation
/// precedes or follows content lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The word is in the source language: scrape and translate run
    /// independently and race to completion
    SourceToTarget,
    /// The word is in the target language: it must be translated back to
    /// the source language before content lookup is possible
    TargetToSource,
}

/// One row of the glossary source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryRow {
    /// Word in the source language, empty when absent
    pub source_word: String,

    /// Word in the target language, empty when absent
    pub target_word: String,

    /// Existing definition, empty when the row still needs enrichment
    pub definition: String,
}

impl GlossaryRow {
    /// Build a row from up to three sheet cells
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |idx: usize| cells.get(idx).cloned().unwrap_or_default();
        Self {
            source_word: cell(0),
            target_word: cell(1),
            definition: cell(2),
        }
    }

    /// Whether the row already carries a definition
    pub fn has_definition(&self) -> bool {
        !self.definition.trim().is_empty()
    }

    /// The word this row is about, regardless of direction
    pub fn word(&self) -> Option<&str> {
        if !self.source_word.trim().is_empty() {
            Some(self.source_word.as_str())
        } else if !self.target_word.trim().is_empty() {
            Some(self.target_word.as_str())
        } else {
            None
        }
    }

    /// Resolve the row into a word pending enrichment.
    ///
    /// Returns `Ok(None)` for rows that need no work (existing definition or
    /// entirely empty). A row with both language columns populated is a
    /// configuration error that aborts glossary preparation.
    ///
    /// `row_index` is the 1-based sheet row, used for error reporting.
    pub fn resolve(&self, row_index: usize) -> Result<Option<(String, Direction)>, GlossaryError> {
        if self.has_definition() {
            return Ok(None);
        }

        let source = self.source_word.trim();
        let target = self.target_word.trim();

        match (source.is_empty(), target.is_empty()) {
            (false, false) => Err(GlossaryError::AmbiguousRow {
                row_index,
                source_word: self.source_word.clone(),
                target_word: self.target_word.clone(),
            }),
            // Case is preserved as supplied: the word doubles as the
            // content lookup key.
            (false, true) => Ok(Some((self.source_word.clone(), Direction::SourceToTarget))),
            (true, false) => Ok(Some((self.target_word.clone(), Direction::TargetToSource))),
            (true, true) => Ok(None),
        }
    }
}
