//! Generic document tree built from filing markup.
//!
//! Filings are converted into a loosely-typed [`Node`] tree first, and all
//! field resolution runs against that tree rather than the raw DOM.

mod parse;
mod tree;

pub use parse::parse_document;
pub use tree::{first_node, first_present, KeyPath, Node, TEXT_KEY};
