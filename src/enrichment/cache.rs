/*!
 * Translation caching functionality.
 *
 * Translations are pure lookups keyed by text and direction, so an
 * interrupted run that re-enqueues already-translated words can answer
 * repeat requests without another API call.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::glossary::Direction;

/// Cache key combining source text and translation direction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey(String, Direction);

/// Hit/miss counters, snapshotted by [`TranslationCache::stats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, String>,
    stats: CacheStats,
}

/// Translation cache shared between the orchestrator's sub-tasks.
///
/// Cloning is cheap and every clone sees the same entries.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    state: Arc<RwLock<CacheState>>,
    enabled: bool,
}

impl TranslationCache {
    /// Create a new translation cache
    pub fn new(enabled: bool) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::default())),
            enabled,
        }
    }

    /// Look up a previously stored translation
    pub fn get(&self, text: &str, direction: Direction) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let mut state = self.state.write();
        let found = state.entries.get(&CacheKey(text.to_string(), direction)).cloned();

        match found {
            Some(translation) => {
                state.stats.hits += 1;
                Some(translation)
            }
            None => {
                state.stats.misses += 1;
                None
            }
        }
    }

    /// Record a translation for later lookups
    pub fn store(&self, text: &str, direction: Direction, translation: &str) {
        if !self.enabled {
            return;
        }

        self.state.write().entries.insert(
            CacheKey(text.to_string(), direction),
            translation.to_string(),
        );
        debug!("Cached translation ({:?}, {} chars)", direction, text.chars().count());
    }

    /// Snapshot the hit/miss counters
    pub fn stats(&self) -> CacheStats {
        self.state.read().stats
    }

    /// Number of cached translations
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true)
    }
}
