use async_trait::async_trait;
use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::file_utils::FileManager;
use crate::providers::DefinitionSource;

/// Matches `<script type="application/ld+json">...</script>` blocks in the
/// dictionary page. The payload this pipeline needs is the second block.
static JSON_LD_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<script[^>]*type="application/ld\+json"[^>]*>(.*?)</script>"#)
        .expect("JSON-LD script pattern is valid")
});

/// DWDS definition source: fetches dictionary pages and extracts their
/// JSON-LD payload
///
/// Extracted payloads are persisted under the scrapes directory, one JSON
/// file per word, and a lookup short-circuits when the file already exists.
pub struct Dwds {
    /// HTTP client for page fetches
    client: Client,
    /// Dictionary URL prefix, the word is appended directly
    base_url: String,
    /// Directory holding one scraped JSON file per word
    scrapes_dir: PathBuf,
}

impl Dwds {
    /// Create a new DWDS source
    pub fn new(
        base_url: impl Into<String>,
        scrapes_dir: impl Into<PathBuf>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            scrapes_dir: scrapes_dir.into(),
        }
    }

    /// Path of the dump file holding a word's extracted payload
    fn dump_path(&self, word: &str) -> PathBuf {
        self.scrapes_dir.join(format!("{}.json", word))
    }

    /// Build the dictionary page URL for a word, percent-encoding non-ASCII
    /// characters
    fn page_url(&self, word: &str) -> Result<Url, ProviderError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(word))
            .map_err(|e| ProviderError::RequestFailed(
                format!("Invalid dictionary URL for {:?}: {}", word, e)
            ))
    }

    /// Extract the dictionary payload from a fetched page.
    ///
    /// The page must carry exactly two JSON-LD script blocks; the second is
    /// the dictionary entry. Any other count means the page is not a usable
    /// entry (error page, disambiguation, layout change).
    fn extract_payload(page: &str, url: &str) -> Option<serde_json::Value> {
        let blocks: Vec<&str> = JSON_LD_SCRIPT.captures_iter(page)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();

        if blocks.len() != 2 {
            error!("Found {} JSON-LD blocks in {}", blocks.len(), url);
            return None;
        }

        match serde_json::from_str(blocks[1]) {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Error decoding JSON in {}: {}", url, e);
                None
            }
        }
    }

    fn persist_payload(&self, path: &Path, payload: &serde_json::Value) -> Result<(), ProviderError> {
        FileManager::write_json(path, payload)
            .map_err(|e| ProviderError::RequestFailed(
                format!("Failed to persist scrape for {:?}: {}", path, e)
            ))
    }
}

impl std::fmt::Debug for Dwds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dwds")
            .field("base_url", &self.base_url)
            .field("scrapes_dir", &self.scrapes_dir)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DefinitionSource for Dwds {
    async fn lookup(&self, word: &str) -> Result<Option<PathBuf>, ProviderError> {
        let dump_path = self.dump_path(word);
        if FileManager::file_exists(&dump_path) {
            debug!("Scrape file for {} already present", word);
            return Ok(Some(dump_path));
        }

        let url = self.page_url(word)?;
        let response = self.client.get(url.clone())
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(
                format!("Failed to fetch {}: {}", url, e)
            ))?;

        let status = response.status();
        if !status.is_success() {
            error!("Got return code {} in {}", status.as_u16(), url);
            return Ok(None);
        }

        let page = response.text().await
            .map_err(|e| ProviderError::ParseError(
                format!("Failed to read page body from {}: {}", url, e)
            ))?;

        match Self::extract_payload(&page, url.as_str()) {
            Some(payload) => {
                self.persist_payload(&dump_path, &payload)?;
                Ok(Some(dump_path))
            }
            None => Ok(None),
        }
    }
}
