//! HTTP client for the SEC EDGAR endpoints.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::config::{
    filing_url, search_params, EDGAR_ARCHIVES_URL, EDGAR_SEARCH_URL, FALLBACK_USER_AGENT,
    FILING_REQUEST_DELAY_MS, HTTP_TIMEOUT_SECS,
};
use crate::error::Result;

/// Settings for [`EdgarClient`].
#[derive(Debug, Clone)]
pub struct EdgarConfig {
    /// `User-Agent` header; EDGAR rejects anonymous clients.
    pub user_agent: String,
    pub search_url: String,
    pub archives_url: String,
    pub timeout: Duration,
    /// Pause before every filing fetch.
    pub request_delay: Duration,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: FALLBACK_USER_AGENT.to_string(),
            search_url: EDGAR_SEARCH_URL.to_string(),
            archives_url: EDGAR_ARCHIVES_URL.to_string(),
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            request_delay: Duration::from_millis(FILING_REQUEST_DELAY_MS),
        }
    }
}

impl EdgarConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    pub fn with_archives_url(mut self, url: impl Into<String>) -> Self {
        self.archives_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }
}

/// Client for EDGAR full-text search and filing archives.
///
/// Holds one connection pool; cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct EdgarClient {
    http: Client,
    config: EdgarConfig,
}

impl EdgarClient {
    /// Create a client with the configured timeout and user agent.
    pub fn new(config: EdgarConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &EdgarConfig {
        &self.config
    }

    /// Query the full-text search index for N-PORT filings.
    ///
    /// Returns the response body untouched. Non-2xx responses are errors.
    pub async fn search(&self, security: &str) -> Result<Vec<u8>> {
        tracing::debug!(url = %self.config.search_url, security, "searching EDGAR");

        let response = self
            .http
            .get(&self.config.search_url)
            .query(&search_params(security))
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    /// Download the primary document of one filing as text.
    ///
    /// Sleeps for the configured request delay first. Non-2xx responses
    /// are errors; no retries are attempted. The body is decoded lossily.
    pub async fn fetch_filing(&self, cik: &str, accession: &str) -> Result<String> {
        tokio::time::sleep(self.config.request_delay).await;

        let url = filing_url(&self.config.archives_url, cik, accession);
        tracing::debug!(url = %url, "fetching filing");

        let response = self.http.get(&url).send().await?.error_for_status()?;

        // Undecodable bytes become U+FFFD so one bad entry cannot sink the filing.
        Ok(response.text().await?)
    }
}
