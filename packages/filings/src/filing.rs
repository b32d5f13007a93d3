//! Fetch one N-PORT filing and extract its matching holdings.

use serde::Serialize;

use crate::error::{FilingError, Result};
use crate::holdings::{extract_holdings, Holding};
use crate::http::EdgarClient;
use crate::xml::parse_document;

const MISSING_PARAMETERS: &str = "cik, accession, and security are required";

/// A validated filing lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingRequest {
    pub cik: String,
    pub accession: String,
    pub security: String,
}

impl FilingRequest {
    /// Validate that all three inputs are present and non-empty.
    ///
    /// # Examples
    /// ```
    /// use nport_filings::FilingRequest;
    ///
    /// assert!(FilingRequest::new(Some("36405"), Some("0001-24-1"), Some("apple")).is_ok());
    /// assert!(FilingRequest::new(Some("36405"), None, Some("apple")).is_err());
    /// ```
    pub fn new(
        cik: Option<&str>,
        accession: Option<&str>,
        security: Option<&str>,
    ) -> Result<Self> {
        match (non_empty(cik), non_empty(accession), non_empty(security)) {
            (Some(cik), Some(accession), Some(security)) => Ok(Self {
                cik: cik.to_string(),
                accession: accession.to_string(),
                security: security.to_string(),
            }),
            _ => Err(FilingError::MissingParameters(MISSING_PARAMETERS)),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Result of a filing lookup, as returned to API callers.
///
/// A failed lookup is a normal outcome: `success` is false, `holdings` is
/// empty and `error` carries the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilingOutcome {
    pub success: bool,
    pub holdings: Vec<Holding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FilingOutcome {
    pub fn found(holdings: Vec<Holding>) -> Self {
        let message = if holdings.is_empty() {
            "No matching holdings"
        } else {
            "Found holdings"
        };
        Self {
            success: true,
            holdings,
            message: Some(message.to_string()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            holdings: Vec::new(),
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Fetch, parse and filter one filing.
///
/// Never fails: network errors, timeouts, non-2xx responses and malformed
/// markup all produce [`FilingOutcome::failed`].
pub async fn fetch_holdings(client: &EdgarClient, request: &FilingRequest) -> FilingOutcome {
    match try_fetch_holdings(client, request).await {
        Ok(holdings) => {
            tracing::info!(
                cik = %request.cik,
                accession = %request.accession,
                matches = holdings.len(),
                "extracted holdings"
            );
            FilingOutcome::found(holdings)
        }
        Err(e) => {
            tracing::warn!(
                cik = %request.cik,
                accession = %request.accession,
                error = %e,
                "filing lookup failed"
            );
            FilingOutcome::failed(e.to_string())
        }
    }
}

async fn try_fetch_holdings(
    client: &EdgarClient,
    request: &FilingRequest,
) -> Result<Vec<Holding>> {
    let xml = client.fetch_filing(&request.cik, &request.accession).await?;
    let tree = parse_document(&xml)?;
    Ok(extract_holdings(&tree, &request.security))
}
