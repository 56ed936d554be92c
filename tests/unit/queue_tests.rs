/*!
 * Tests for the work queue builder and its persistence
 */

use std::collections::HashSet;

use wortfluss::enrichment::queue::WorkQueue;
use wortfluss::glossary::Direction;

use crate::common::{create_temp_dir, create_test_file, row};

#[test]
fn test_build_withEmptyDataset_shouldQueueAllQualifyingWords() {
    let rows = vec![
        row("Haus", "", ""),
        row("", "building", ""),
        row("Linde", "", "lime tree"),
    ];

    let queue = WorkQueue::build(&rows, &HashSet::new()).unwrap();

    assert_eq!(queue.len(), 2);
    assert!(queue.contains("Haus"));
    assert!(queue.contains("building"));
    // Row with an existing definition is not queued
    assert!(!queue.contains("Linde"));
}

#[test]
fn test_build_withExistingDatasetWords_shouldQueueOnlyTheDiff() {
    let rows = vec![
        row("Haus", "", ""),
        row("Baum", "", ""),
    ];
    let existing: HashSet<String> = ["Haus".to_string()].into_iter().collect();

    let queue = WorkQueue::build(&rows, &existing).unwrap();

    assert_eq!(queue.len(), 1);
    assert!(queue.contains("Baum"));
}

#[test]
fn test_build_shouldTagEachWordWithItsDirection() {
    let rows = vec![
        row("Haus", "", ""),
        row("", "building", ""),
    ];

    let queue = WorkQueue::build(&rows, &HashSet::new()).unwrap();

    let entries: Vec<_> = queue.iter().collect();
    assert_eq!(entries[0].0, "Haus");
    assert_eq!(entries[0].1.direction, Direction::SourceToTarget);
    assert_eq!(entries[1].0, "building");
    assert_eq!(entries[1].1.direction, Direction::TargetToSource);
}

#[test]
fn test_build_withAmbiguousRow_shouldAbortThePreparation() {
    let rows = vec![
        row("Haus", "", ""),
        row("Baum", "tree", ""),
    ];

    assert!(WorkQueue::build(&rows, &HashSet::new()).is_err());
}

#[test]
fn test_persistAndLoad_shouldRestoreTheSameQueue() {
    let temp_dir = create_temp_dir().unwrap();
    let queue_path = temp_dir.path().join("_scrape_queue.json");

    let rows = vec![row("Haus", "", ""), row("", "building", "")];
    let queue = WorkQueue::build(&rows, &HashSet::new()).unwrap();
    queue.persist(&queue_path).unwrap();

    let loaded = WorkQueue::load(&queue_path).unwrap();
    assert_eq!(loaded, queue);
}

#[test]
fn test_load_withCorruptFile_shouldTreatItAsAbsent() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let queue_path = create_test_file(&dir, "_scrape_queue.json", "{not json").unwrap();

    assert!(WorkQueue::load(&queue_path).is_none());
}

#[test]
fn test_load_withMissingFile_shouldTreatItAsAbsent() {
    assert!(WorkQueue::load("does/not/exist.json").is_none());
}
