//! Taxonomy resources
//!
//! Concept metadata (labels, documentation, literature references) comes
//! from a local catalog. Loading is done once per run; the tagging engine
//! only sees the read-only [`MetadataStore`] trait.

mod concept;
mod store;

pub use concept::{Concept, ConceptReference};
pub use store::{MetadataStore, TaxonomyCatalog};
