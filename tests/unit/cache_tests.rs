/*!
 * Tests for translation caching functionality
 */

use wortfluss::enrichment::cache::TranslationCache;
use wortfluss::glossary::Direction;

#[test]
fn test_cacheStoreAndGet_shouldReturnStoredTranslation() {
    let cache = TranslationCache::new(true);

    cache.store("Haus", Direction::SourceToTarget, "house");

    assert_eq!(
        cache.get("Haus", Direction::SourceToTarget),
        Some("house".to_string())
    );
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cacheGet_withDifferentDirection_shouldMiss() {
    let cache = TranslationCache::new(true);

    cache.store("Haus", Direction::SourceToTarget, "house");

    assert_eq!(cache.get("Haus", Direction::TargetToSource), None);
}

#[test]
fn test_cacheStats_shouldCountHitsAndMisses() {
    let cache = TranslationCache::new(true);

    cache.store("Haus", Direction::SourceToTarget, "house");
    cache.get("Haus", Direction::SourceToTarget);
    cache.get("Baum", Direction::SourceToTarget);

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_cacheStats_withNoLookups_shouldReportZeroHitRate() {
    let cache = TranslationCache::new(true);
    assert_eq!(cache.stats().hit_rate(), 0.0);
}

#[test]
fn test_disabledCache_shouldNeverStoreOrReturn() {
    let cache = TranslationCache::new(false);

    cache.store("Haus", Direction::SourceToTarget, "house");

    assert_eq!(cache.get("Haus", Direction::SourceToTarget), None);
    assert!(cache.is_empty());
    assert!(!cache.is_enabled());
}

#[test]
fn test_clonedCache_shouldShareStorage() {
    let cache = TranslationCache::new(true);
    let cloned = cache.clone();

    cache.store("Haus", Direction::SourceToTarget, "house");

    assert_eq!(
        cloned.get("Haus", Direction::SourceToTarget),
        Some("house".to_string())
    );
}
