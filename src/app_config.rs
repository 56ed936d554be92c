use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::language_utils::{self, LanguagePair};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1), the language of the definition source
    pub source_language: String,

    /// Target language code (ISO 639-1), the language translations are produced in
    pub target_language: String,

    /// Translation provider config
    pub translator: TranslatorConfig,

    /// Definition source config
    pub definition_source: DefinitionSourceConfig,

    /// Spreadsheet store config
    pub spreadsheet: SpreadsheetConfig,

    /// Enrichment run config
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Durable file locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslatorConfig {
    /// API key; falls back to the DEEPL_KEY environment variable when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL
    #[serde(default = "default_translator_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_translator_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TranslatorConfig {
    /// Resolve the API key from config or environment
    pub fn get_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var(DEEPL_KEY_VAR).unwrap_or_default()
    }
}

/// Environment variable consulted when no API key is configured
pub const DEEPL_KEY_VAR: &str = "DEEPL_KEY";

/// Definition source configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DefinitionSourceConfig {
    /// Dictionary URL prefix, the looked-up word is appended directly
    #[serde(default = "default_definition_endpoint")]
    pub endpoint: String,

    /// Directory holding one scraped JSON file per word
    #[serde(default = "default_scrapes_dir")]
    pub scrapes_dir: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DefinitionSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_definition_endpoint(),
            scrapes_dir: default_scrapes_dir(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Spreadsheet store configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpreadsheetConfig {
    /// API endpoint URL
    #[serde(default = "default_spreadsheet_endpoint")]
    pub endpoint: String,

    /// Spreadsheet identifier
    #[serde(default = "String::new")]
    pub spreadsheet_id: String,

    /// Worksheet (tab) name
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// 1-based column the definitions are written back to
    #[serde(default = "default_definition_column")]
    pub definition_column: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            endpoint: default_spreadsheet_endpoint(),
            spreadsheet_id: String::new(),
            sheet_name: default_sheet_name(),
            api_key: String::new(),
            definition_column: default_definition_column(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Enrichment run configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnrichmentConfig {
    /// Maximum number of words enriched concurrently
    #[serde(default = "default_concurrent_words")]
    pub max_concurrent_words: usize,

    /// Time budget for a single example's translation, in seconds
    #[serde(default = "default_example_timeout_secs")]
    pub example_timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_concurrent_words: default_concurrent_words(),
            example_timeout_secs: default_example_timeout_secs(),
        }
    }
}

/// Durable file locations
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Consolidated dataset file
    #[serde(default = "default_dataset_file")]
    pub dataset_file: String,

    /// Pending-work queue file
    #[serde(default = "default_queue_file")]
    pub queue_file: String,

    /// Incorrect-words side file
    #[serde(default = "default_incorrect_file")]
    pub incorrect_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dataset_file: default_dataset_file(),
            queue_file: default_queue_file(),
            incorrect_file: default_incorrect_file(),
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_translator_endpoint() -> String {
    "https://api-free.deepl.com".to_string()
}

fn default_definition_endpoint() -> String {
    "https://www.dwds.de/wb/".to_string()
}

fn default_spreadsheet_endpoint() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

fn default_definition_column() -> usize {
    3
}

fn default_scrapes_dir() -> String {
    "scrapes".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_concurrent_words() -> usize {
    8
}

fn default_example_timeout_secs() -> u64 {
    10
}

fn default_dataset_file() -> String {
    "_dump.json".to_string()
}

fn default_queue_file() -> String {
    "_scrape_queue.json".to_string()
}

fn default_incorrect_file() -> String {
    "_to_be_fixed.json".to_string()
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Language pair construction performs code validation
        self.language_pair()?;

        if self.translator.get_api_key().is_empty() {
            return Err(anyhow!(
                "No translation API key configured and {} is not set", DEEPL_KEY_VAR
            ));
        }

        if self.enrichment.max_concurrent_words == 0 {
            return Err(anyhow!("max_concurrent_words must be at least 1"));
        }

        if self.spreadsheet.definition_column == 0 {
            return Err(anyhow!("definition_column is 1-based and must be at least 1"));
        }

        Ok(())
    }

    /// The configured language pair
    pub fn language_pair(&self) -> Result<LanguagePair> {
        language_utils::LanguagePair::new(&self.source_language, &self.target_language)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: "de".to_string(),
            target_language: "en".to_string(),
            translator: TranslatorConfig::default(),
            definition_source: DefinitionSourceConfig::default(),
            spreadsheet: SpreadsheetConfig::default(),
            enrichment: EnrichmentConfig::default(),
            storage: StorageConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
