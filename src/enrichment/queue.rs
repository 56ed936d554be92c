/*!
 * The durable work queue of words pending enrichment.
 *
 * Built once from a glossary diff, persisted between pipeline runs, and
 * drained read-only by the orchestrator.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::Result;

use crate::errors::GlossaryError;
use crate::file_utils::FileManager;
use crate::glossary::{Direction, GlossaryRow};

/// One pending word, tagged with its translation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Whether the word needs scrape+translate or translate-then-scrape
    pub direction: Direction,
}

/// The pending-work queue, keyed by word.
///
/// A BTreeMap keeps iteration deterministic, so repeat runs over an
/// unchanged glossary visit words in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkQueue {
    entries: BTreeMap<String, QueueEntry>,
}

impl WorkQueue {
    /// Build the queue from glossary rows, diffed against the current dataset.
    ///
    /// A word qualifies when its row has no existing definition and the word
    /// is not already covered by a dataset entry. A row with both language
    /// columns set is a fatal configuration error.
    pub fn build(rows: &[GlossaryRow], existing_words: &HashSet<String>) -> Result<Self, GlossaryError> {
        let mut entries = BTreeMap::new();

        for (idx, row) in rows.iter().enumerate() {
            // Sheet rows are 1-based and the header occupies row 1.
            let row_index = idx + 2;

            let Some((word, direction)) = row.resolve(row_index)? else {
                continue;
            };

            if existing_words.contains(&word) {
                continue;
            }

            debug!("To be scraped: {}, direction={:?}", word, direction);
            entries.insert(word, QueueEntry { direction });
        }

        Ok(Self { entries })
    }

    /// Load a persisted queue, treating a missing or corrupt file as absent
    pub fn load<P: AsRef<Path>>(path: P) -> Option<Self> {
        FileManager::read_json_or_none(path)
    }

    /// Persist the queue for the next run
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_json(path, self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in word order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &QueueEntry)> {
        self.entries.iter()
    }

    /// Owned snapshot of the entries, for handing to the fan-out
    pub fn iter_cloned(&self) -> Vec<(String, QueueEntry)> {
        self.entries.iter()
            .map(|(word, entry)| (word.clone(), *entry))
            .collect()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }
}
