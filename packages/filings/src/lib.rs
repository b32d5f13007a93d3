//! N-PORT Filings - Search SEC EDGAR and extract fund holdings.
//!
//! This crate forwards security-name searches to the EDGAR full-text search
//! index and extracts holdings from a single N-PORT `primary_doc.xml`
//! filing, filtered by a search term.
//!
//! # Example
//!
//! ```
//! use nport_filings::{extract_holdings, parse_document};
//!
//! let xml = r#"<edgarSubmission><formData>
//!     <invstOrSecs><invstOrSec>
//!         <name>Apple Inc.</name><balance>10</balance><valUSD>1500</valUSD>
//!     </invstOrSec></invstOrSecs>
//! </formData></edgarSubmission>"#;
//!
//! let tree = parse_document(xml).unwrap();
//! let holdings = extract_holdings(&tree, "apple");
//! assert_eq!(holdings.len(), 1);
//! assert_eq!(holdings[0].price_in_usd, 150.0);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Endpoints, timeouts and URL construction
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Conversion of filing markup into a generic [`Node`] tree
//! - [`holdings`]: Tolerant holdings extraction over the generic tree
//! - [`http`]: EDGAR HTTP client
//! - [`filing`]: Fetch one filing and extract its holdings
//! - [`search`]: Full-text search relay
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod filing;
pub mod holdings;
pub mod http;
pub mod search;
pub mod xml;

pub use error::{FilingError, Result};
pub use filing::{fetch_holdings, FilingOutcome, FilingRequest};
pub use holdings::{extract_holdings, Holding};
pub use http::{EdgarClient, EdgarConfig};
pub use search::{relay_search, SearchRequest};
pub use xml::{parse_document, Node};
