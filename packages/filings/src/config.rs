//! Configuration constants and URL construction for EDGAR access.

/// EDGAR full-text search endpoint.
pub const EDGAR_SEARCH_URL: &str = "https://efts.sec.gov/LATEST/search-index";

/// Base URL for EDGAR filing archives.
pub const EDGAR_ARCHIVES_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// Document name of the N-PORT primary filing document.
pub const PRIMARY_DOCUMENT: &str = "primary_doc.xml";

/// HTTP timeout in seconds for every outbound EDGAR request.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Fixed delay before each filing fetch, in milliseconds.
///
/// Keeps bursts of filing lookups under EDGAR's informal request-rate limit.
pub const FILING_REQUEST_DELAY_MS: u64 = 50;

/// User agent sent when `SEC_USER_AGENT` is not configured.
pub const FALLBACK_USER_AGENT: &str = "NPORT-Analyzer internal-tool@localhost";

/// Form category searched in the full-text index.
pub const SEARCH_CATEGORY: &str = "form-cat1";

/// Form type searched in the full-text index.
pub const SEARCH_FORMS: &str = "NPORT-P";

/// Number of search results requested (first page only).
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// Query parameters sent to the full-text search endpoint.
pub fn search_params(security: &str) -> Vec<(&'static str, String)> {
    vec![
        ("q", security.to_string()),
        ("category", SEARCH_CATEGORY.to_string()),
        ("forms", SEARCH_FORMS.to_string()),
        ("page", "1".to_string()),
        ("from", "0".to_string()),
        ("size", SEARCH_PAGE_SIZE.to_string()),
    ]
}

/// Remove every dash from an accession number.
///
/// # Examples
/// ```
/// use nport_filings::config::accession_without_dashes;
///
/// assert_eq!(accession_without_dashes("0001752724-24-043130"), "000175272424043130");
/// ```
pub fn accession_without_dashes(accession: &str) -> String {
    accession.replace('-', "")
}

/// Build the URL of a filing's primary document.
///
/// # Arguments
/// * `base_url` - Archives base URL (normally [`EDGAR_ARCHIVES_URL`])
/// * `cik` - Central Index Key of the filer
/// * `accession` - Accession number, with or without dashes
///
/// # Examples
/// ```
/// use nport_filings::config::{filing_url, EDGAR_ARCHIVES_URL};
///
/// assert_eq!(
///     filing_url(EDGAR_ARCHIVES_URL, "36405", "0001752724-24-043130"),
///     "https://www.sec.gov/Archives/edgar/data/36405/000175272424043130/primary_doc.xml"
/// );
/// ```
pub fn filing_url(base_url: &str, cik: &str, accession: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        base_url.trim_end_matches('/'),
        cik,
        accession_without_dashes(accession),
        PRIMARY_DOCUMENT
    )
}
