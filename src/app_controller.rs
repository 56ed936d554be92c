use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::enrichment::cache::TranslationCache;
use crate::enrichment::dataset::{self, DatasetWriter, DictionaryEntry};
use crate::enrichment::orchestrator::{EnrichmentResult, Orchestrator};
use crate::enrichment::queue::WorkQueue;
use crate::file_utils::FileManager;
use crate::glossary::GlossaryRow;
use crate::providers::deepl::DeepL;
use crate::providers::dwds::Dwds;
use crate::providers::sheets::Sheets;
use crate::providers::{DefinitionSource, SpreadsheetStore, Translator};

// @module: Application controller for glossary compilation

/// Main application controller driving the compilation pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Translation adapter
    translator: Arc<dyn Translator>,

    // @field: Definition source adapter
    definitions: Arc<dyn DefinitionSource>,

    // @field: Spreadsheet store adapter
    spreadsheet: Arc<dyn SpreadsheetStore>,
}

impl Controller {
    // @method: Create a controller with real collaborators built from config
    pub fn with_config(config: Config) -> Result<Self> {
        let language_pair = config.language_pair()?;

        let translator = Arc::new(DeepL::new(
            config.translator.get_api_key(),
            config.translator.endpoint.clone(),
            language_pair,
            config.translator.timeout_secs,
        ));

        let definitions = Arc::new(Dwds::new(
            config.definition_source.endpoint.clone(),
            config.definition_source.scrapes_dir.clone(),
            config.definition_source.timeout_secs,
        ));

        let spreadsheet = Arc::new(Sheets::new(
            config.spreadsheet.endpoint.clone(),
            config.spreadsheet.spreadsheet_id.clone(),
            config.spreadsheet.sheet_name.clone(),
            config.spreadsheet.api_key.clone(),
            config.spreadsheet.timeout_secs,
        ));

        Ok(Self { config, translator, definitions, spreadsheet })
    }

    /// Create a controller with explicitly injected collaborators.
    ///
    /// Adapters are plain trait objects so tests can substitute
    /// deterministic fakes for the real HTTP clients.
    pub fn with_collaborators(
        config: Config,
        translator: Arc<dyn Translator>,
        definitions: Arc<dyn DefinitionSource>,
        spreadsheet: Arc<dyn SpreadsheetStore>,
    ) -> Self {
        Self { config, translator, definitions, spreadsheet }
    }

    /// Compile the glossary dataset.
    ///
    /// When `reload` is false and a dataset already exists on disk, it is
    /// returned as-is. Otherwise the word list is fetched from the
    /// spreadsheet store, the pending-work queue is rebuilt (or resumed from
    /// its persisted form), every queued word is enriched, and the
    /// consolidated result is persisted and written back.
    pub async fn compile(&self, reload: bool) -> Result<Vec<DictionaryEntry>> {
        info!("Starting glossary compilation (reload={})", reload);

        let writer = DatasetWriter::new(
            &self.config.storage.dataset_file,
            &self.config.storage.incorrect_file,
        );

        // Step 1. Prefer the local dataset unless a reload was requested.
        if !reload {
            if let Some(entries) = writer.load() {
                info!("Loaded {} entries from current dataset file", entries.len());
                return Ok(entries);
            }
            debug!("No usable local dataset, falling back to the glossary source");
        }

        // Step 2. Read the word list.
        let rows = self.spreadsheet.fetch_rows().await
            .context("Fetching glossary failed")?;

        // Step 3. Build or resume the pending-work queue.
        let queue = self.prepare_queue(reload, &rows, &writer)?;

        if queue.is_empty() {
            info!("No words pending enrichment");
            FileManager::delete_file(&self.config.storage.queue_file);
            return Ok(writer.load().unwrap_or_default());
        }

        // Step 4. Enrich every queued word.
        let results = self.enrich(&queue).await;

        // Step 5. Consolidate, persist, and write back. The queue only holds
        // the diff, so entries for words outside this run are carried over
        // before the dataset file is overwritten in full.
        let (entries, incorrect_words) = DatasetWriter::partition(&results);

        let mut all_entries: Vec<DictionaryEntry> = writer.load()
            .unwrap_or_default()
            .into_iter()
            .filter(|entry| !queue.contains(&entry.word))
            .collect();
        all_entries.extend(entries);
        all_entries.sort_by(|a, b| a.word.cmp(&b.word));

        writer.write(&all_entries, &incorrect_words)?;

        if !incorrect_words.is_empty() {
            warn!(
                "{} words need manual correction, recorded in {}",
                incorrect_words.len(),
                self.config.storage.incorrect_file,
            );
        }

        self.write_back(&rows, &results).await;

        // Step 6. The queue is spent; remove it so the next run rebuilds.
        FileManager::delete_file(&self.config.storage.queue_file);

        info!("Translator calls: {}", self.translator.call_summary());
        info!("Compilation finished with {} dataset entries", all_entries.len());

        Ok(all_entries)
    }

    /// Build the queue from a glossary diff, or resume a persisted queue
    /// from an interrupted run
    fn prepare_queue(
        &self,
        reload: bool,
        rows: &[GlossaryRow],
        writer: &DatasetWriter,
    ) -> Result<WorkQueue> {
        if !reload {
            if let Some(queue) = WorkQueue::load(&self.config.storage.queue_file) {
                info!("Resuming persisted queue with {} words", queue.len());
                return Ok(queue);
            }
        }

        let existing_words: HashSet<String> = writer.load()
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.word)
            .collect();

        let queue = WorkQueue::build(rows, &existing_words)?;
        if !queue.is_empty() {
            queue.persist(&self.config.storage.queue_file)?;
        }

        info!("Queued {} words for enrichment", queue.len());
        Ok(queue)
    }

    /// Drain the queue behind a progress bar
    async fn enrich(&self, queue: &WorkQueue) -> Vec<EnrichmentResult> {
        let orchestrator = Orchestrator::new(
            self.translator.clone(),
            self.definitions.clone(),
            TranslationCache::default(),
            Duration::from_secs(self.config.enrichment.example_timeout_secs),
            self.config.enrichment.max_concurrent_words,
        );

        let progress_bar = ProgressBar::new(queue.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} words ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let pb = progress_bar.clone();
        let results = orchestrator.drain(queue, move |done, _total| {
            pb.set_position(done as u64);
        }).await;

        progress_bar.finish_and_clear();
        results
    }

    /// Issue the batched spreadsheet update for successfully translated words
    async fn write_back(&self, rows: &[GlossaryRow], results: &[EnrichmentResult]) {
        let by_word: BTreeMap<String, EnrichmentResult> = results.iter()
            .map(|result| (result.word.clone(), result.clone()))
            .collect();

        let updates = dataset::build_cell_updates(
            rows,
            &by_word,
            self.config.spreadsheet.definition_column,
        );

        debug!("Batch updates to be issued: {} cells", updates.len());

        // A writeback failure must not corrupt the already-persisted dataset,
        // so it is reported rather than propagated.
        if let Err(e) = self.spreadsheet.batch_update(&updates).await {
            error!("Spreadsheet writeback failed: {}", e);
        } else {
            debug!("Batch updates completed");
        }
    }
}
