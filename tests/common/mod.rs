/*!
 * Common test utilities for the wortfluss test suite
 */

use std::path::PathBuf;
use anyhow::Result;
use serde_json::{Value, json};
use tempfile::TempDir;

use wortfluss::glossary::GlossaryRow;


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a glossary row from three cell values
pub fn row(source_word: &str, target_word: &str, definition: &str) -> GlossaryRow {
    GlossaryRow {
        source_word: source_word.to_string(),
        target_word: target_word.to_string(),
        definition: definition.to_string(),
    }
}

/// Builds a scraped JSON-LD payload with the given example sentences
pub fn payload_with_examples(examples: &[&str]) -> Value {
    let mut entries = vec![json!({"@type": "DictionaryEntry", "name": "stub"})];
    for example in examples {
        entries.push(json!({"@type": "Quotation", "text": example}));
    }
    Value::Array(entries)
}

/// A payload for "Haus" with three example sentences
pub fn haus_payload() -> Value {
    payload_with_examples(&[
        "Das Haus ist alt.",
        "Wir bauen ein Haus.",
        "Vor dem Haus steht eine Linde.",
    ])
}
