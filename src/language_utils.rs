use anyhow::{Result, anyhow};
use isolang::Language;

use crate::glossary::Direction;

/// Language utilities for the configured language pair
///
/// The pipeline works on exactly two languages: the source language the
/// definition source is written in, and the target language translations
/// are produced in. Both are configured as ISO 639-1 codes.
/// Validate that a code is a known ISO 639-1 language code
pub fn validate_language_code(code: &str) -> Result<Language> {
    let normalized = code.trim().to_lowercase();

    if normalized.len() != 2 {
        return Err(anyhow!("Expected a 2-letter ISO 639-1 code, got: {}", code));
    }

    Language::from_639_1(&normalized)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Get the English display name for a language code, falling back to the
/// code itself when it cannot be resolved
pub fn get_language_name(code: &str) -> String {
    match validate_language_code(code) {
        Ok(language) => language.to_name().to_string(),
        Err(_) => code.to_string(),
    }
}

/// The configured source/target language pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    /// Language the definition source is written in (e.g. "de")
    pub source: String,
    /// Language translations are produced in (e.g. "en")
    pub target: String,
}

impl LanguagePair {
    /// Create a pair from two ISO 639-1 codes
    pub fn new(source: &str, target: &str) -> Result<Self> {
        validate_language_code(source)?;
        validate_language_code(target)?;

        if source.eq_ignore_ascii_case(target) {
            return Err(anyhow!(
                "Source and target language must differ, both are: {}", source
            ));
        }

        Ok(Self {
            source: source.trim().to_lowercase(),
            target: target.trim().to_lowercase(),
        })
    }

    /// Resolve a translation direction into (from, to) language codes
    pub fn codes_for(&self, direction: Direction) -> (&str, &str) {
        match direction {
            Direction::SourceToTarget => (&self.source, &self.target),
            Direction::TargetToSource => (&self.target, &self.source),
        }
    }
}
