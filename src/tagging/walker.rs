//! Lookup tagging: Build → Scan → Done
//!
//! Build turns the reference filing into a [`LookupIndex`]. Scan visits
//! every element of the target document's body once, in document order,
//! and matches its normalized string against the table lookup first and
//! the fact lookup second. Done hands back the accumulated collection.
//! There is no backtracking; a node matching neither lookup produces no
//! record. Elements that merely wrap a single child element share its
//! string and are skipped, so nested markup such as
//! `<td><p><span>Total</span></p></td>` is tagged once, at the innermost
//! element.

use super::assembler::TagAssembler;
use super::cancel::CancellationToken;
use super::record::TagCollection;
use crate::config::TaggerConfig;
use crate::document::{Document, DocumentParser, MarkupParser};
use crate::error::{TaggerError, TaggerResult};
use crate::extract::{ExtractParser, InlineExtractParser, ReferenceExtract};
use crate::fuzzy::{CandidateSet, FuzzyMatcher};
use crate::lookup::LookupIndex;
use crate::taxonomy::MetadataStore;
use crate::text::normalize;
use std::path::Path;
use tracing::{debug, info};

/// Lookup index with fuzzy-match candidates prepared for scanning
struct PreparedIndex<'i> {
    index: &'i LookupIndex,
    table: CandidateSet,
    facts: CandidateSet,
}

impl<'i> PreparedIndex<'i> {
    fn new(index: &'i LookupIndex) -> Self {
        Self {
            index,
            table: CandidateSet::new(index.table.keys()),
            facts: CandidateSet::new(index.facts.keys()),
        }
    }
}

/// Tags a target document from a reference filing's lookups
pub struct LookupTagger<'a> {
    store: &'a dyn MetadataStore,
    matcher: FuzzyMatcher,
    cancel: Option<CancellationToken>,
}

impl<'a> LookupTagger<'a> {
    pub fn new(store: &'a dyn MetadataStore) -> Self {
        Self {
            store,
            matcher: FuzzyMatcher::new(),
            cancel: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.matcher = FuzzyMatcher::with_threshold(threshold);
        self
    }

    /// Check `token` between node visits during Scan
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn matcher(&self) -> &FuzzyMatcher {
        &self.matcher
    }

    /// Build phase.
    pub fn build(
        &self,
        reference: &Document,
        extract: Option<&ReferenceExtract>,
        selected: &[String],
    ) -> LookupIndex {
        LookupIndex::build(reference, extract, selected)
    }

    /// Scan phase over a target document.
    pub fn scan(&self, target: &Document, index: &LookupIndex) -> TaggerResult<TagCollection> {
        let prepared = PreparedIndex::new(index);
        let assembler = TagAssembler::new(self.store);
        let mut tags = TagCollection::new();
        let (mut visited, mut table_hits, mut fact_hits, mut cascaded) = (0usize, 0usize, 0usize, 0usize);

        for node in target.descendants(target.body()) {
            if let Some(token) = &self.cancel {
                token.checkpoint()?;
            }

            if let [only] = target.children(node) {
                if target.name(*only).is_some() {
                    continue;
                }
            }
            let Some(raw) = target.string(node) else {
                continue;
            };
            let text = normalize(raw);
            if text.is_empty() {
                continue;
            }
            visited += 1;

            if let Some(found) = self.matcher.find(&text, &prepared.table) {
                let Some(concept) = prepared.index.table.get(found.key) else {
                    continue;
                };
                debug!(text = %text, key = found.key, score = found.score, concept, "table match");
                assembler.register(target, node, concept, &text, &mut tags);
                cascaded += assembler.cascade_row(target, node, concept, &mut tags);
                table_hits += 1;
            } else if let Some(found) = self.matcher.find(&text, &prepared.facts) {
                let Some(concept) = prepared.index.facts.get(found.key) else {
                    continue;
                };
                debug!(text = %text, key = found.key, score = found.score, concept, "fact match");
                assembler.register(target, node, concept, &text, &mut tags);
                fact_hits += 1;
            }
        }

        info!(
            visited,
            table_hits,
            fact_hits,
            cascaded,
            tags = tags.len(),
            "scan complete"
        );
        Ok(tags)
    }

    /// Build then Scan.
    ///
    /// `selected` names the firm-specific facts whose reference values feed
    /// the fact lookup; it is ignored without an extract.
    pub fn tag(
        &self,
        target: &Document,
        reference: &Document,
        extract: Option<&ReferenceExtract>,
        selected: Option<&[String]>,
    ) -> TaggerResult<TagCollection> {
        let index = self.build(reference, extract, selected.unwrap_or(&[]));
        self.scan(target, &index)
    }

    /// Parse both filings from disk and tag the target.
    ///
    /// The reference filing doubles as the source of the firm-specific
    /// fact extract. A failure to read or parse either file is fatal.
    pub fn tag_files(
        &self,
        target: impl AsRef<Path>,
        reference: impl AsRef<Path>,
        config: &TaggerConfig,
    ) -> TaggerResult<TagCollection> {
        let parser = MarkupParser::new();
        let reference = load(&parser, reference.as_ref()).map_err(TaggerError::ReferenceDocument)?;
        let target = load(&parser, target.as_ref()).map_err(TaggerError::TargetDocument)?;

        let extract = (!config.selected_facts.is_empty()).then(|| {
            InlineExtractParser::new()
                .with_store(self.store)
                .non_dimensional(config.non_dimensional)
                .extract(&reference, &config.selected_facts)
        });

        self.tag(&target, &reference, extract.as_ref(), Some(&config.selected_facts))
    }
}

/// Read and parse a filing, describing any failure with its path
fn load(parser: &impl DocumentParser, path: &Path) -> Result<Document, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let doc = parser
        .parse(&bytes)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    info!(path = %path.display(), nodes = doc.len(), "document loaded");
    Ok(doc)
}
