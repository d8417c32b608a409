use anyhow::Context;
use serde::Deserialize;

use crate::parse::MarkEntry;
use crate::table::MarksDataset;

/// Anything that goes wrong talking to the scoring store. The status surface
/// collapses all of these into one human-readable "update failed" message;
/// none are retried.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store returned HTTP {0}")]
    Status(u16),

    #[error("malformed store response: {0}")]
    Malformed(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Blocking HTTP client for the external scoring store. Cheap to clone; each
/// in-flight pipeline carries its own copy onto a worker thread. No timeout
/// is applied to store calls.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::blocking::Client,
    base: String,
}

#[derive(Deserialize)]
struct UpdateResponse {
    #[serde(rename = "marksData")]
    marks_data: MarksDataset,
}

impl StoreClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = base_url.trim_end_matches('/').to_string();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            anyhow::bail!("store URL must start with http:// or https://: {base_url}");
        }
        let http = reqwest::blocking::Client::builder()
            .build()
            .context("build HTTP client")?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// One update per parsed entry. The response body carries the full
    /// refreshed dataset, which replaces the previous view wholesale.
    pub fn submit(&self, entry: &MarkEntry) -> Result<MarksDataset, StoreError> {
        let resp = self
            .http
            .post(format!("{}/api/update_marks", self.base))
            .json(entry)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        let body: UpdateResponse = resp
            .json()
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(body.marks_data)
    }

    /// Read-only fetch of the current dataset, for populating the table
    /// without submitting anything.
    pub fn fetch(&self) -> Result<MarksDataset, StoreError> {
        let resp = self
            .http
            .get(format!("{}/api/get_marks", self.base))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        resp.json().map_err(|e| StoreError::Malformed(e.to_string()))
    }

    /// The export endpoint is navigated to by the shell, not fetched here;
    /// the daemon only hands back the absolute URL.
    pub fn export_url(&self) -> String {
        format!("{}/api/download_excel", self.base)
    }
}
