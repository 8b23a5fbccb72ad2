//! Taxotag: taxonomy-grounded tagging of financial filings
//!
//! Given an inline-XBRL reference filing and an untagged target document,
//! taxotag learns which row titles and firm-specific fact values the
//! reference associates with which taxonomy concepts, then fuzzy-matches
//! the target's text against them and emits a tag record per match.
//!
//! # Core Concepts
//!
//! - **Lookups**: row title → concept (`TableLookup`) and rendered fact
//!   value → concept (`FactLookup`), built from the reference filing
//! - **Matching**: rapidfuzz-compatible WRatio with an acceptance threshold
//! - **Tag records**: concept, value, sign and taxonomy metadata, keyed by
//!   tag id
//!
//! # Example
//!
//! ```
//! use taxotag::{LookupTagger, MarkupParser, TaxonomyCatalog};
//!
//! let parser = MarkupParser::new();
//! let reference = parser
//!     .parse_str(r#"<body><table><tr><td>Total revenues</td>
//!         <td><ix:nonFraction name="us-gaap:Revenues" contextRef="c">1,200</ix:nonFraction></td></tr></table></body>"#)
//!     .unwrap();
//! let target = parser
//!     .parse_str("<body><table><tr><td>Total revenues</td><td>1,500</td></tr></table></body>")
//!     .unwrap();
//!
//! let store = TaxonomyCatalog::empty();
//! let tags = LookupTagger::new(&store).tag(&target, &reference, None, None).unwrap();
//! assert_eq!(tags.len(), 2);
//! ```

pub mod config;
pub mod document;
mod error;
pub mod extract;
pub mod fuzzy;
pub mod lookup;
pub mod tagging;
pub mod taxonomy;
pub mod text;

pub use config::{OutputFormat, TaggerConfig};
pub use document::{Document, DocumentParser, MarkupParser, NodeId};
pub use error::{TaggerError, TaggerResult};
pub use extract::{ExtractParser, ExtractedFact, InlineExtractParser, ReferenceExtract};
pub use fuzzy::FuzzyMatcher;
pub use lookup::{LookupIndex, LookupTable};
pub use tagging::{
    CancellationToken, FactValue, InlineTagger, LookupTagger, Sign, TagCollection, TagRecord,
};
pub use taxonomy::{Concept, MetadataStore, TaxonomyCatalog};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
