use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::glossary::GlossaryRow;
use crate::providers::{CellUpdate, SpreadsheetStore};

/// Spreadsheet store client over the Google Sheets values API
pub struct Sheets {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
    /// Spreadsheet identifier
    spreadsheet_id: String,
    /// Worksheet (tab) name
    sheet_name: String,
    /// API key for authentication
    api_key: String,
}

/// Response of a values read
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    /// Row-major cell values; short rows omit trailing empty cells
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Body of a batched values update
#[derive(Debug, Serialize)]
struct BatchUpdateRequest {
    /// How values are interpreted; definitions are plain text
    #[serde(rename = "valueInputOption")]
    value_input_option: String,

    /// One entry per cell update
    data: Vec<ValueRange>,
}

/// A single range/values pair in a batched update
#[derive(Debug, Serialize)]
struct ValueRange {
    /// Target range in A1 notation
    range: String,
    /// Row-major values for the range
    values: Vec<Vec<String>>,
}

impl Sheets {
    /// Create a new spreadsheet client
    pub fn new(
        endpoint: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        sheet_name: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            spreadsheet_id: spreadsheet_id.into(),
            sheet_name: sheet_name.into(),
            api_key: api_key.into(),
        }
    }

    fn values_url(&self, suffix: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values{}",
            self.endpoint.trim_end_matches('/'),
            self.spreadsheet_id,
            suffix,
        )
    }
}

impl std::fmt::Debug for Sheets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sheets")
            .field("endpoint", &self.endpoint)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet_name", &self.sheet_name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SpreadsheetStore for Sheets {
    async fn fetch_rows(&self) -> Result<Vec<GlossaryRow>, ProviderError> {
        let url = format!(
            "{}/{}?key={}",
            self.values_url(""),
            self.sheet_name,
            self.api_key,
        );

        let response = self.client.get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(
                format!("Failed to fetch spreadsheet values: {}", e)
            ))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Spreadsheet API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let values = response.json::<ValuesResponse>().await
            .map_err(|e| ProviderError::ParseError(
                format!("Failed to parse spreadsheet values: {}", e)
            ))?;

        // Header row carries column titles, not data.
        let rows: Vec<GlossaryRow> = values.values.iter()
            .skip(1)
            .map(|cells| GlossaryRow::from_cells(cells))
            .collect();

        debug!("Obtained {} glossary rows from spreadsheet", rows.len());
        Ok(rows)
    }

    async fn batch_update(&self, updates: &[CellUpdate]) -> Result<(), ProviderError> {
        if updates.is_empty() {
            debug!("No cell updates to issue");
            return Ok(());
        }

        let body = BatchUpdateRequest {
            value_input_option: "RAW".to_string(),
            data: updates.iter()
                .map(|u| ValueRange {
                    range: format!("{}!{}", self.sheet_name, u.range),
                    values: vec![vec![u.value.clone()]],
                })
                .collect(),
        };

        let url = format!("{}?key={}", self.values_url(":batchUpdate"), self.api_key);

        let response = self.client.post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(
                format!("Failed to send batch update: {}", e)
            ))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Spreadsheet batch update error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        debug!("Batch update of {} cells completed", updates.len());
        Ok(())
    }
}
