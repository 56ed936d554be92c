/*!
 * Tests for dataset consolidation, the incorrect-words side file, and the
 * writeback batch
 */

use std::collections::BTreeMap;

use wortfluss::enrichment::dataset::{self, DatasetWriter, WordMetadata};
use wortfluss::enrichment::orchestrator::EnrichmentResult;
use wortfluss::glossary::Direction;

use crate::common::{create_temp_dir, row};

fn enriched(word: &str, translation: &str) -> EnrichmentResult {
    EnrichmentResult {
        word: word.to_string(),
        direction: Direction::SourceToTarget,
        translation: Some(translation.to_string()),
        content: Some(format!("scrapes/{}.json", word).into()),
        examples: vec![("Das Haus ist alt.".to_string(), "The house is old.".to_string())],
        metadata: WordMetadata { genus: Some(format!("das {}", word)) },
        incorrect: false,
    }
}

fn failed(word: &str) -> EnrichmentResult {
    EnrichmentResult {
        word: word.to_string(),
        direction: Direction::SourceToTarget,
        translation: None,
        content: None,
        examples: Vec::new(),
        metadata: WordMetadata::default(),
        incorrect: true,
    }
}

#[test]
fn test_partition_shouldSeparateIncorrectWordsFromEntries() {
    let results = vec![enriched("Haus", "house"), failed("Auto"), enriched("Baum", "tree")];

    let (entries, incorrect_words) = DatasetWriter::partition(&results);

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.word != "Auto"));
    assert_eq!(incorrect_words, vec!["Auto"]);
}

#[test]
fn test_partition_shouldSortEntriesByWord() {
    let results = vec![enriched("Zaun", "fence"), enriched("Apfel", "apple")];

    let (entries, _) = DatasetWriter::partition(&results);

    assert_eq!(entries[0].word, "Apfel");
    assert_eq!(entries[1].word, "Zaun");
}

#[test]
fn test_write_withIncorrectWords_shouldWriteTheSideFile() {
    let temp_dir = create_temp_dir().unwrap();
    let dataset_path = temp_dir.path().join("_dump.json");
    let incorrect_path = temp_dir.path().join("_to_be_fixed.json");
    let writer = DatasetWriter::new(&dataset_path, &incorrect_path);

    let (entries, incorrect_words) = DatasetWriter::partition(&[enriched("Haus", "house"), failed("Auto")]);
    writer.write(&entries, &incorrect_words).unwrap();

    assert!(dataset_path.exists());
    assert!(incorrect_path.exists());

    let recorded: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(&incorrect_path).unwrap()).unwrap();
    assert_eq!(recorded, vec!["Auto"]);
}

#[test]
fn test_write_withNoIncorrectWords_shouldNotWriteTheSideFile() {
    let temp_dir = create_temp_dir().unwrap();
    let dataset_path = temp_dir.path().join("_dump.json");
    let incorrect_path = temp_dir.path().join("_to_be_fixed.json");
    let writer = DatasetWriter::new(&dataset_path, &incorrect_path);

    let (entries, incorrect_words) = DatasetWriter::partition(&[enriched("Haus", "house")]);
    writer.write(&entries, &incorrect_words).unwrap();

    assert!(dataset_path.exists());
    assert!(!incorrect_path.exists());
}

#[test]
fn test_write_shouldOverwriteThePriorDatasetInFull() {
    let temp_dir = create_temp_dir().unwrap();
    let dataset_path = temp_dir.path().join("_dump.json");
    let writer = DatasetWriter::new(&dataset_path, temp_dir.path().join("_to_be_fixed.json"));

    let (first, _) = DatasetWriter::partition(&[enriched("Haus", "house"), enriched("Baum", "tree")]);
    writer.write(&first, &[]).unwrap();

    let (second, _) = DatasetWriter::partition(&[enriched("Zaun", "fence")]);
    writer.write(&second, &[]).unwrap();

    let loaded = writer.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].word, "Zaun");
}

#[test]
fn test_load_withCorruptDatasetFile_shouldTreatItAsAbsent() {
    let temp_dir = create_temp_dir().unwrap();
    let dataset_path = temp_dir.path().join("_dump.json");
    std::fs::write(&dataset_path, "][").unwrap();

    let writer = DatasetWriter::new(&dataset_path, temp_dir.path().join("_to_be_fixed.json"));
    assert!(writer.load().is_none());
}

#[test]
fn test_buildCellUpdates_shouldAddressDefinitionCellsByRowOrder() {
    let rows = vec![
        row("Haus", "", ""),
        row("Linde", "", "lime tree"),
        row("", "building", ""),
    ];

    let mut results = BTreeMap::new();
    results.insert("Haus".to_string(), enriched("Haus", "house"));
    results.insert("building".to_string(), enriched("building", "Gebäude"));

    let updates = dataset::build_cell_updates(&rows, &results, 3);

    // Row 2 is "Haus", row 3 already has a definition, row 4 is "building".
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].range, "C2");
    assert_eq!(updates[0].value, "house");
    assert_eq!(updates[1].range, "C4");
    assert_eq!(updates[1].value, "Gebäude");
}

#[test]
fn test_buildCellUpdates_withWordMissingFromResults_shouldSkipTheRow() {
    let rows = vec![row("Haus", "", ""), row("Baum", "", "")];

    let mut results = BTreeMap::new();
    results.insert("Haus".to_string(), enriched("Haus", "house"));

    let updates = dataset::build_cell_updates(&rows, &results, 3);

    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].range, "C2");
}

#[test]
fn test_buildCellUpdates_withUntranslatedResult_shouldSkipTheRow() {
    let rows = vec![row("Auto", "", "")];

    let mut results = BTreeMap::new();
    results.insert("Auto".to_string(), failed("Auto"));

    let updates = dataset::build_cell_updates(&rows, &results, 3);
    assert!(updates.is_empty());
}
