/*!
 * Dataset consolidation and writeback.
 *
 * Finalized enrichment results are partitioned into dictionary entries and
 * incorrect words; the entries overwrite the durable dataset in full, the
 * incorrect words go to a side file for manual follow-up, and successfully
 * translated words are written back to the spreadsheet's definition column
 * in one batched call.
 */

use anyhow::Result;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::enrichment::orchestrator::EnrichmentResult;
use crate::file_utils::FileManager;
use crate::glossary::{Direction, GlossaryRow};
use crate::providers::{CellUpdate, rowcol_to_a1};

/// Grammatical metadata attached to a dictionary entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMetadata {
    /// Definite-article phrase indicating grammatical gender, when detected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,
}

/// One finalized, persisted dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// The word as it appeared in the glossary
    pub word: String,

    /// Which language the word originated in
    pub direction: Direction,

    /// Machine translation of the word; null when the translation sub-task
    /// failed but the entry was still finalized
    pub translation: Option<String>,

    /// (source sentence, translated sentence) pairs
    pub examples: Vec<(String, String)>,

    /// Grammatical metadata extracted from the examples
    pub metadata: WordMetadata,
}

/// Writer for the durable dataset and the incorrect-words side file
pub struct DatasetWriter {
    /// Path of the consolidated dataset file
    dataset_path: PathBuf,

    /// Path of the incorrect-words side file
    incorrect_path: PathBuf,
}

impl DatasetWriter {
    /// Create a writer for the given file locations
    pub fn new(dataset_path: impl Into<PathBuf>, incorrect_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            incorrect_path: incorrect_path.into(),
        }
    }

    /// Partition finalized results into dictionary entries and incorrect words.
    ///
    /// Results arrive in completion order; entries are sorted by word so
    /// repeat runs over an unchanged glossary produce identical files.
    pub fn partition(results: &[EnrichmentResult]) -> (Vec<DictionaryEntry>, Vec<String>) {
        let mut entries = Vec::new();
        let mut incorrect_words = Vec::new();

        for result in results {
            if result.incorrect {
                incorrect_words.push(result.word.clone());
                continue;
            }

            entries.push(DictionaryEntry {
                word: result.word.clone(),
                direction: result.direction,
                translation: result.translation.clone(),
                examples: result.examples.clone(),
                metadata: result.metadata.clone(),
            });
        }

        entries.sort_by(|a, b| a.word.cmp(&b.word));
        incorrect_words.sort();

        (entries, incorrect_words)
    }

    /// Persist the consolidated dataset and the incorrect-words side file.
    ///
    /// The dataset file is overwritten in full: a run always recomputes the
    /// complete dataset. The side file is written only when there are
    /// incorrect words to record.
    pub fn write(&self, entries: &[DictionaryEntry], incorrect_words: &[String]) -> Result<()> {
        debug!("Dumping {} entries to {:?}", entries.len(), self.dataset_path);
        FileManager::write_json(&self.dataset_path, &entries)?;

        if !incorrect_words.is_empty() {
            debug!("Writing {} incorrect words to {:?}", incorrect_words.len(), self.incorrect_path);
            FileManager::write_json(&self.incorrect_path, &incorrect_words)?;
        }

        Ok(())
    }

    /// Load the persisted dataset, treating a missing or corrupt file as absent
    pub fn load(&self) -> Option<Vec<DictionaryEntry>> {
        FileManager::read_json_or_none(&self.dataset_path)
    }
}

/// Build the batched spreadsheet update mapping each successfully translated
/// word back to its definition-column cell.
///
/// Cells are addressed by row order matching the original glossary rows.
/// A row whose word was queued but is missing a finalized translation is a
/// reportable, non-fatal error; it is skipped and the batch still carries
/// every resolved word.
pub fn build_cell_updates(
    rows: &[GlossaryRow],
    results: &BTreeMap<String, EnrichmentResult>,
    definition_column: usize,
) -> Vec<CellUpdate> {
    let mut updates = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        // Data rows start at sheet row 2, below the header.
        let row_index = idx + 2;

        if row.has_definition() {
            continue;
        }

        let Some(word) = row.word() else {
            continue;
        };

        let Some(result) = results.get(word) else {
            error!("No finalized result found for {}", word);
            continue;
        };

        let Some(translation) = result.translation.as_deref() else {
            warn!("No translation available for {}, skipping writeback", word);
            continue;
        };

        updates.push(CellUpdate {
            range: rowcol_to_a1(row_index, definition_column),
            value: translation.to_string(),
        });
    }

    updates
}
