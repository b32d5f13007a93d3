//! Relay of security-name searches to the EDGAR full-text index.

use crate::error::{FilingError, Result};
use crate::http::EdgarClient;

const MISSING_SECURITY: &str = "security parameter required";

/// A validated search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub security: String,
}

impl SearchRequest {
    pub fn new(security: Option<&str>) -> Result<Self> {
        match security {
            Some(security) if !security.is_empty() => Ok(Self {
                security: security.to_string(),
            }),
            _ => Err(FilingError::MissingParameters(MISSING_SECURITY)),
        }
    }
}

/// Forward a search and return the index's JSON body verbatim.
pub async fn relay_search(client: &EdgarClient, request: &SearchRequest) -> Result<Vec<u8>> {
    client.search(&request.security).await.inspect_err(|e| {
        tracing::error!(security = %request.security, error = %e, "search failed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_validation() {
        assert!(SearchRequest::new(Some("Apple")).is_ok());
        assert!(SearchRequest::new(Some("")).is_err());

        let err = SearchRequest::new(None).unwrap_err();
        assert_eq!(err.to_string(), MISSING_SECURITY);
    }
}
