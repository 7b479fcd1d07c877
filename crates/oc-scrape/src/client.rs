//! Blocking HTTP client for library tags pages

use crate::extract::extract_tags;
use oc_types::{AppError, AppResult, RawTag};
use std::time::Duration;
use tracing::info;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TagPageClient {
    client: reqwest::blocking::Client,
}

impl TagPageClient {
    pub fn new() -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("ollama-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch the raw HTML of a tags page
    pub fn fetch(&self, url: &str) -> AppResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::Http(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Http(format!("{} returned status {}", url, status)));
        }

        response
            .text()
            .map_err(|e| AppError::Http(format!("Failed to read body of {}: {}", url, e)))
    }

    /// Fetch a tags page and extract its tag rows
    ///
    /// An empty result is an error: either the page layout changed or the
    /// URL points somewhere that is not a tags page.
    pub fn fetch_tags(&self, url: &str) -> AppResult<Vec<RawTag>> {
        let html = self.fetch(url)?;
        let tags = extract_tags(&html);

        if tags.is_empty() {
            return Err(AppError::Scrape(format!("No tag rows found at {}", url)));
        }

        info!("Found {} tag rows at {}", tags.len(), url);
        Ok(tags)
    }
}
