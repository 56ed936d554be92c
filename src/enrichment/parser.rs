/*!
 * Content parser: extracts example sentences and grammatical metadata from
 * raw scraped content.
 *
 * Pure functions, no I/O. The scraped payload is the JSON-LD array embedded
 * in a dictionary page; entries typed `Quotation` carry usage examples.
 */

use log::debug;
use regex::Regex;
use serde_json::Value;

/// Extract example sentences from a scraped JSON-LD payload, in document order
pub fn parse_examples(payload: &Value) -> Vec<String> {
    let Some(entries) = payload.as_array() else {
        return Vec::new();
    };

    entries.iter()
        .filter(|entry| entry.get("@type").and_then(Value::as_str) == Some("Quotation"))
        .filter_map(|entry| entry.get("text").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// Detect the grammatical gender of a word from its example sentences.
///
/// Looks for a definite article (der/die/das) preceding the word, allowing
/// one intervening token for adjectives and case inflections. Returns every
/// matched phrase; the first is the best candidate.
pub fn parse_genus(examples: &[String], word: &str) -> Vec<String> {
    let pattern = format!(r"(?i)\b(?:der|die|das)\s*\w*\s*{}\b", regex::escape(word));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            debug!("Genus pattern failed for {:?}: {}", word, e);
            return Vec::new();
        }
    };

    examples.iter()
        .filter_map(|line| re.find(line))
        .map(|m| m.as_str().to_string())
        .collect()
}
