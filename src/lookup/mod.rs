//! Lookup indices consulted by the fuzzy matcher

mod index;

pub use index::{LookupIndex, LookupTable};
