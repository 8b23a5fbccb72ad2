//! Parsed document trees
//!
//! The tagging engine only needs a navigable tree: element names,
//! attributes, sole-string content, the enclosing table row of a node and
//! its source position. `DocumentParser` is the seam; `MarkupParser` is the
//! quick-xml implementation used for HTML and inline-XBRL filings.

mod node;
mod parser;

pub use node::{Document, Node, NodeId, NodeKind};
pub use parser::MarkupParser;

use crate::error::TaggerResult;

/// Turns raw filing bytes into a [`Document`]
pub trait DocumentParser {
    fn parse(&self, bytes: &[u8]) -> TaggerResult<Document>;
}
