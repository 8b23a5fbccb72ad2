//! Reference extract: machine-readable facts of a prior filing
//!
//! The reference filing's inline-XBRL facts supply firm-specific values
//! (registrant name, file number, ticker) that the target document repeats
//! verbatim. Contexts are read so dimensional facts can be left out.

mod context;
mod parser;

pub use context::{ContextMap, Period, XbrlContext};
pub use parser::{ExtractParser, ExtractedFact, InlineExtractParser, ReferenceExtract};
