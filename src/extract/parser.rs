//! Fact extraction from an inline-XBRL reference filing

use super::context::ContextMap;
use crate::document::Document;
use crate::taxonomy::MetadataStore;
use crate::text::{detach_words, normalize, strip_prefix};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Inline elements that carry facts
const FACT_ELEMENTS: &[&str] = &["ix:nonfraction", "ix:nonnumeric"];

/// A firm-specific fact read from the reference filing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFact {
    pub label: String,
    /// Rendered, normalized text of the fact
    pub value: String,
    pub context_ref: Option<String>,
}

/// Facts by unprefixed concept name, in order of first appearance.
///
/// A concept reported several times keeps its last value.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ReferenceExtract {
    facts: IndexMap<String, ExtractedFact>,
}

impl ReferenceExtract {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, fact: ExtractedFact) {
        self.facts.insert(name.into(), fact);
    }

    pub fn get(&self, name: &str) -> Option<&ExtractedFact> {
        self.facts.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtractedFact)> {
        self.facts.iter().map(|(name, fact)| (name.as_str(), fact))
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Reads name → value pairs for selected facts out of a parsed filing
pub trait ExtractParser {
    /// An empty selection extracts every fact.
    fn extract(&self, document: &Document, selected: &[String]) -> ReferenceExtract;
}

/// Extract parser for inline-XBRL documents
#[derive(Clone, Copy, Default)]
pub struct InlineExtractParser<'a> {
    store: Option<&'a dyn MetadataStore>,
    non_dimensional: bool,
}

impl<'a> InlineExtractParser<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take fact labels from the taxonomy instead of the concept name
    pub fn with_store(mut self, store: &'a dyn MetadataStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Skip facts whose context is qualified by dimension members
    pub fn non_dimensional(mut self, non_dimensional: bool) -> Self {
        self.non_dimensional = non_dimensional;
        self
    }

    fn label_for(&self, name: &str) -> String {
        self.store
            .and_then(|store| store.lookup(name))
            .and_then(|concept| concept.label.clone())
            .unwrap_or_else(|| detach_words(name))
    }
}

impl ExtractParser for InlineExtractParser<'_> {
    fn extract(&self, document: &Document, selected: &[String]) -> ReferenceExtract {
        let contexts = if self.non_dimensional {
            ContextMap::from_document(document)
        } else {
            ContextMap::default()
        };
        let selected: Vec<&str> = selected.iter().map(|s| strip_prefix(s)).collect();

        let mut extract = ReferenceExtract::new();
        for node in document.descendants(document.root()) {
            let is_fact = document
                .name(node)
                .is_some_and(|name| FACT_ELEMENTS.contains(&name));
            let Some(qualified) = document.attr(node, "name").filter(|_| is_fact) else {
                continue;
            };
            let name = strip_prefix(qualified);
            if !selected.is_empty() && !selected.contains(&name) {
                continue;
            }

            let context_ref = document.attr(node, "contextref").map(str::to_string);
            if self.non_dimensional {
                let dimensional = context_ref
                    .as_deref()
                    .and_then(|id| contexts.get(id))
                    .is_some_and(|c| c.dimensional);
                if dimensional {
                    continue;
                }
            }

            let value = normalize(&document.text(node));
            if value.is_empty() {
                debug!(fact = name, "skipping fact with no rendered value");
                continue;
            }

            extract.insert(
                name,
                ExtractedFact {
                    label: self.label_for(name),
                    value,
                    context_ref,
                },
            );
        }

        debug!(facts = extract.len(), "reference extract read");
        extract
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MarkupParser;
    use crate::taxonomy::{Concept, TaxonomyCatalog};

    const FILING: &str = r#"<html><body>
<ix:header><ix:resources>
<xbrli:context id="D2020"><xbrli:entity><xbrli:identifier scheme="cik">1</xbrli:identifier></xbrli:entity>
  <xbrli:period><xbrli:startDate>2020-01-01</xbrli:startDate><xbrli:endDate>2020-12-31</xbrli:endDate></xbrli:period></xbrli:context>
<xbrli:context id="D2020_Class"><xbrli:entity><xbrli:identifier scheme="cik">1</xbrli:identifier>
  <xbrli:segment><xbrldi:explicitMember dimension="a:Axis">a:Member</xbrldi:explicitMember></xbrli:segment></xbrli:entity>
  <xbrli:period><xbrli:startDate>2020-01-01</xbrli:startDate><xbrli:endDate>2020-12-31</xbrli:endDate></xbrli:period></xbrli:context>
</ix:resources></ix:header>
<p>Registrant: <ix:nonNumeric name="dei:EntityRegistrantName" contextRef="D2020">Acme&#160;Holdings, Inc.</ix:nonNumeric></p>
<p>Ticker: <ix:nonNumeric name="dei:TradingSymbol" contextRef="D2020_Class">ACME</ix:nonNumeric></p>
<p>File number: <ix:nonNumeric name="dei:EntityFileNumber" contextRef="D2020">001-12345</ix:nonNumeric></p>
</body></html>"#;

    fn names(extract: &ReferenceExtract) -> Vec<&str> {
        extract.iter().map(|(name, _)| name).collect()
    }

    #[test]
    fn selected_facts_are_extracted_unprefixed() {
        let doc = MarkupParser::new().parse_str(FILING).unwrap();
        let selected = vec!["dei:EntityRegistrantName".to_string(), "TradingSymbol".to_string()];
        let extract = InlineExtractParser::new().extract(&doc, &selected);

        assert_eq!(names(&extract), vec!["EntityRegistrantName", "TradingSymbol"]);
        let registrant = extract.get("EntityRegistrantName").unwrap();
        assert_eq!(registrant.value, "Acme Holdings, Inc.");
        assert_eq!(registrant.label, "Entity Registrant Name");
        assert_eq!(registrant.context_ref.as_deref(), Some("D2020"));
    }

    #[test]
    fn empty_selection_extracts_everything() {
        let doc = MarkupParser::new().parse_str(FILING).unwrap();
        let extract = InlineExtractParser::new().extract(&doc, &[]);
        assert_eq!(extract.len(), 3);
    }

    #[test]
    fn non_dimensional_skips_member_contexts() {
        let doc = MarkupParser::new().parse_str(FILING).unwrap();
        let extract = InlineExtractParser::new()
            .non_dimensional(true)
            .extract(&doc, &[]);

        assert_eq!(names(&extract), vec!["EntityRegistrantName", "EntityFileNumber"]);
    }

    #[test]
    fn labels_come_from_the_store_when_available() {
        let doc = MarkupParser::new().parse_str(FILING).unwrap();
        let catalog = TaxonomyCatalog::from_concepts([
            Concept::new("EntityFileNumber").with_label("Entity File Number (SEC)"),
        ]);
        let extract = InlineExtractParser::new()
            .with_store(&catalog)
            .extract(&doc, &["EntityFileNumber".to_string()]);

        assert_eq!(extract.get("EntityFileNumber").unwrap().label, "Entity File Number (SEC)");
    }
}
