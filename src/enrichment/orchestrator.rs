/*!
 * Enrichment orchestrator: the per-word state machine and the run-level
 * fan-out over the work queue.
 *
 * Source-language words launch two independent sub-tasks, scrape and
 * translate, which race to completion. Each sub-task writes its slot and
 * performs an atomic fetch-and-check on the word's completion counter;
 * whichever sub-task fills the last slot runs the combine step and sends the
 * finalized result through a channel consumed exactly once. Target-language
 * words translate first, and only a successful translation is scraped.
 *
 * The run waits for every queued word before returning, so the dataset
 * writer always sees one consistent, complete batch. A sub-task with no
 * timeout of its own can stall the whole batch; that trade-off matches the
 * per-run completion gate and is bounded in practice by the adapters' HTTP
 * timeouts.
 */

use futures::stream::{self, StreamExt};
use log::{debug, error, warn};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Semaphore, oneshot};
use tokio::time::timeout;

use crate::enrichment::cache::TranslationCache;
use crate::enrichment::dataset::WordMetadata;
use crate::enrichment::parser;
use crate::enrichment::queue::{QueueEntry, WorkQueue};
use crate::errors::ProviderError;
use crate::file_utils::FileManager;
use crate::glossary::Direction;
use crate::providers::{DefinitionSource, Translator};

/// Accumulator for one word's outcome, finalized by the combine step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentResult {
    /// The word as it appeared in the queue
    pub word: String,

    /// Which language the word originated in
    pub direction: Direction,

    /// Machine translation of the word, when it succeeded
    pub translation: Option<String>,

    /// Reference to the raw scraped content; null means the scrape failed
    pub content: Option<PathBuf>,

    /// (source sentence, translated sentence) pairs
    pub examples: Vec<(String, String)>,

    /// Grammatical metadata extracted from the raw example text
    pub metadata: WordMetadata,

    /// True once it is determined the word cannot enter the dataset
    pub incorrect: bool,
}

impl EnrichmentResult {
    fn failed(word: String, direction: Direction, translation: Option<String>) -> Self {
        Self {
            word,
            direction,
            translation,
            content: None,
            examples: Vec::new(),
            metadata: WordMetadata::default(),
            incorrect: true,
        }
    }
}

/// Per-word shared state for the racing sub-tasks.
///
/// Each slot is assigned once, by its own sub-task; the completion counter
/// is the only cross-task coordination point.
struct WordTask {
    /// The word as queued
    word: String,

    /// Content lookup key: the word itself, or its translated form for
    /// reverse-direction words
    lookup_word: String,

    direction: Direction,

    /// Translation slot; outer None = sub-task still running, inner None =
    /// translation failed
    translation: Mutex<Option<Option<String>>>,

    /// Content slot, same two-level convention
    content: Mutex<Option<Option<PathBuf>>>,

    /// Count of filled slots
    filled: AtomicU8,

    /// Slots this word needs before it can combine
    required: u8,

    /// Finalized-result channel, consumed by the combining sub-task
    done_tx: Mutex<Option<oneshot::Sender<EnrichmentResult>>>,
}

impl WordTask {
    fn new(
        word: String,
        lookup_word: String,
        direction: Direction,
        required: u8,
        done_tx: oneshot::Sender<EnrichmentResult>,
    ) -> Self {
        Self {
            word,
            lookup_word,
            direction,
            translation: Mutex::new(None),
            content: Mutex::new(None),
            filled: AtomicU8::new(0),
            required,
            done_tx: Mutex::new(Some(done_tx)),
        }
    }

    fn set_translation(&self, value: Option<String>) {
        *self.translation.lock() = Some(value);
    }

    fn set_content(&self, value: Option<PathBuf>) {
        *self.content.lock() = Some(value);
    }

    /// Atomic fetch-and-check on the completion counter.
    ///
    /// Returns true for exactly one caller: the sub-task that filled the
    /// last slot, which then owns the combine step. Both sub-tasks may race
    /// here; the counter, not a check-then-act on the slots, decides the
    /// winner.
    fn last_slot_filled(&self) -> bool {
        self.filled.fetch_add(1, Ordering::AcqRel) + 1 == self.required
    }

    fn send_result(&self, result: EnrichmentResult) {
        if let Some(tx) = self.done_tx.lock().take() {
            let _ = tx.send(result);
        }
    }
}

/// Shared orchestrator context handed into spawned sub-tasks
struct Inner {
    translator: Arc<dyn Translator>,
    definitions: Arc<dyn DefinitionSource>,
    cache: TranslationCache,
    example_timeout: Duration,
    max_concurrent_words: usize,
}

impl Inner {
    /// Translate through the cache; translations are pure lookups, so a
    /// repeat request for the same text is answered locally.
    async fn translate_cached(&self, text: &str, direction: Direction) -> Result<String, ProviderError> {
        if let Some(cached) = self.cache.get(text, direction) {
            return Ok(cached);
        }

        let translated = self.translator.translate(text, direction).await?;
        self.cache.store(text, direction, &translated);
        Ok(translated)
    }
}

/// Drives enrichment for every queued word and gates run completion on the
/// last of them
pub struct Orchestrator {
    inner: Arc<Inner>,
}

impl Orchestrator {
    /// Create an orchestrator over the given collaborators
    pub fn new(
        translator: Arc<dyn Translator>,
        definitions: Arc<dyn DefinitionSource>,
        cache: TranslationCache,
        example_timeout: Duration,
        max_concurrent_words: usize,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                translator,
                definitions,
                cache,
                example_timeout,
                max_concurrent_words: max_concurrent_words.max(1),
            }),
        }
    }

    /// Drain the queue: fan out per-word enrichment, bounded by the worker
    /// pool size, and collect every finalized result.
    ///
    /// No word's failure aborts the run. Results complete in arbitrary
    /// order; `progress` is invoked once per finalized word.
    pub async fn drain(
        &self,
        queue: &WorkQueue,
        progress: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Vec<EnrichmentResult> {
        let total = queue.len();
        let semaphore = Arc::new(Semaphore::new(self.inner.max_concurrent_words));
        let completed = Arc::new(AtomicUsize::new(0));

        stream::iter(queue.iter_cloned())
            .map(|(word, entry)| {
                let inner = self.inner.clone();
                let semaphore = semaphore.clone();
                let completed = completed.clone();
                let progress = progress.clone();

                async move {
                    let _permit = semaphore.acquire().await.unwrap();

                    let result = enrich_word(inner, word, entry).await;

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress(done, total);

                    result
                }
            })
            .buffer_unordered(self.inner.max_concurrent_words)
            .collect::<Vec<_>>()
            .await
    }
}

/// Enrich a single queued word through its per-direction state machine
async fn enrich_word(inner: Arc<Inner>, word: String, entry: QueueEntry) -> EnrichmentResult {
    match entry.direction {
        Direction::SourceToTarget => {
            let (tx, rx) = oneshot::channel();
            let task = Arc::new(WordTask::new(
                word.clone(),
                word.clone(),
                Direction::SourceToTarget,
                2,
                tx,
            ));

            spawn_scrape(inner.clone(), task.clone());
            spawn_translate(inner, task);

            rx.await.unwrap_or_else(|_| {
                error!("Enrichment sub-tasks for {} went away without finalizing", word);
                EnrichmentResult::failed(word, Direction::SourceToTarget, None)
            })
        }
        Direction::TargetToSource => {
            // The translated form is the content lookup key, so translation
            // must succeed before any scraping is attempted.
            let translated = match inner.translate_cached(&word, Direction::TargetToSource).await {
                Ok(translated) => translated,
                Err(e) => {
                    warn!("Upfront translation failed for {}: {}", word, e);
                    return EnrichmentResult::failed(word, Direction::TargetToSource, None);
                }
            };

            let (tx, rx) = oneshot::channel();
            let task = Arc::new(WordTask::new(
                word.clone(),
                translated.clone(),
                Direction::TargetToSource,
                1,
                tx,
            ));
            task.set_translation(Some(translated.clone()));

            spawn_scrape(inner, task);

            rx.await.unwrap_or_else(|_| {
                error!("Scrape sub-task for {} went away without finalizing", word);
                EnrichmentResult::failed(word, Direction::TargetToSource, Some(translated))
            })
        }
    }
}

/// Launch the scrape sub-task for a word
fn spawn_scrape(inner: Arc<Inner>, task: Arc<WordTask>) {
    tokio::spawn(async move {
        let content = match inner.definitions.lookup(&task.lookup_word).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Content lookup failed for {}: {}", task.lookup_word, e);
                None
            }
        };

        task.set_content(content);
        debug!("Set content slot for {}", task.word);

        if task.last_slot_filled() {
            finalize(inner, task).await;
        }
    });
}

/// Launch the translate sub-task for a word
fn spawn_translate(inner: Arc<Inner>, task: Arc<WordTask>) {
    tokio::spawn(async move {
        let translation = match inner.translate_cached(&task.word, task.direction).await {
            Ok(translation) => Some(translation),
            Err(e) => {
                warn!("Translation failed for {}: {}", task.word, e);
                None
            }
        };

        task.set_translation(translation);
        debug!("Set translation slot for {}", task.word);

        if task.last_slot_filled() {
            finalize(inner, task).await;
        }
    });
}

/// Run the combine step and deliver the finalized result
async fn finalize(inner: Arc<Inner>, task: Arc<WordTask>) {
    debug!("Both slots set for {}", task.word);
    let result = combine(&inner, &task).await;
    task.send_result(result);
}

/// The combine step: runs exactly once per word, after all required slots
/// are filled.
///
/// A missing content reference or translation marks the word incorrect.
/// Otherwise the scraped payload is parsed, each example is translated
/// concurrently under the per-example time budget (expired or failed
/// examples are dropped without failing the word), and grammatical metadata
/// is extracted from the raw example text.
async fn combine(inner: &Inner, task: &WordTask) -> EnrichmentResult {
    let translation = task.translation.lock().clone().flatten();
    let content = task.content.lock().clone().flatten();

    let mut result = EnrichmentResult {
        word: task.word.clone(),
        direction: task.direction,
        translation,
        content: content.clone(),
        examples: Vec::new(),
        metadata: WordMetadata::default(),
        incorrect: false,
    };

    let Some(content_path) = content else {
        warn!("No scrape content for {} found", task.word);
        result.incorrect = true;
        return result;
    };

    if result.translation.is_none() {
        warn!("No translation for {}, recording for manual correction", task.word);
        result.incorrect = true;
        return result;
    }

    let Some(payload) = FileManager::read_json_or_none::<serde_json::Value, _>(&content_path) else {
        error!("File {:?} not found for parsing", content_path);
        result.incorrect = true;
        return result;
    };

    let examples = parser::parse_examples(&payload);

    let translated = futures::future::join_all(examples.iter().map(|example| {
        let example = example.clone();
        async move {
            match timeout(
                inner.example_timeout,
                inner.translate_cached(&example, Direction::SourceToTarget),
            ).await {
                Ok(Ok(translation)) => Some((example, translation)),
                Ok(Err(e)) => {
                    warn!("Example translation failed: {}", e);
                    None
                }
                Err(_) => {
                    warn!(
                        "Example translation exceeded {:?} budget, dropping example",
                        inner.example_timeout
                    );
                    None
                }
            }
        }
    })).await;

    result.examples = translated.into_iter().flatten().collect();

    // Genus is detected against the source-language form the examples use.
    let genus_matches = parser::parse_genus(&examples, &task.lookup_word);
    result.metadata = WordMetadata { genus: genus_matches.into_iter().next() };

    result
}
