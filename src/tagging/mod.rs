//! Tagging engine
//!
//! [`LookupTagger`] tags a target document from the lookups of a reference
//! filing; [`InlineTagger`] lists the facts a filing already carries. Both
//! produce a [`TagCollection`] of [`TagRecord`]s keyed by tag id.

mod assembler;
mod cancel;
mod inline;
mod record;
mod walker;

pub use assembler::TagAssembler;
pub use cancel::CancellationToken;
pub use inline::InlineTagger;
pub use record::{Attributes, FactValue, Labels, References, Sign, TagCollection, TagRecord};
pub use walker::LookupTagger;
