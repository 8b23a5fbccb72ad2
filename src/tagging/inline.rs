//! Listing the facts an inline-XBRL document already carries

use super::assembler::TagAssembler;
use super::record::{Attributes, FactValue, Sign, TagCollection, TagRecord};
use crate::document::{Document, NodeId};
use crate::extract::ContextMap;
use crate::taxonomy::MetadataStore;
use crate::text::{normalize, strip_prefix};
use tracing::{debug, info};

const NUMERIC_FACT: &str = "ix:nonfraction";

/// Reads existing inline facts into tag records
#[derive(Clone, Copy)]
pub struct InlineTagger<'a> {
    assembler: TagAssembler<'a>,
}

impl<'a> InlineTagger<'a> {
    pub fn new(store: &'a dyn MetadataStore) -> Self {
        Self {
            assembler: TagAssembler::new(store),
        }
    }

    /// One record per named element below `body` that has a context
    /// reference or an id.
    ///
    /// Numeric facts carry their format, sign, unit and scale; every fact
    /// carries the period of its context when that context is declared.
    pub fn list_tags(&self, document: &Document) -> TagCollection {
        let contexts = ContextMap::from_document(document);
        let mut tags = TagCollection::new();

        for node in document.descendants(document.body()) {
            let Some(name) = document.attr(node, "name") else {
                continue;
            };
            let context_ref = document.attr(node, "contextref");
            let id = match (document.attr(node, "id"), context_ref) {
                (Some(id), _) => id.to_string(),
                (None, Some(context)) => format!("{}{}", name, context),
                (None, None) => continue,
            };

            let mut record = TagRecord::new(id, self.attributes(document, node, strip_prefix(name)));
            record.attributes.period = context_ref
                .and_then(|c| contexts.get(c))
                .and_then(|c| c.period)
                .map(|p| p.to_string());
            self.assembler.enrich(&mut record);

            if !tags.insert(record) {
                debug!(name, "inline fact id repeated; keeping the later fact");
            }
        }

        info!(facts = tags.len(), contexts = contexts.len(), "inline facts listed");
        tags
    }

    fn attributes(&self, document: &Document, node: NodeId, concept: &str) -> Attributes {
        let text = normalize(&document.text(node));
        if !document.is_element(node, NUMERIC_FACT) {
            return Attributes::new(concept, FactValue::Text(text));
        }

        let fact = text
            .replace(',', "")
            .parse::<f64>()
            .map(FactValue::Decimal)
            .unwrap_or(FactValue::Text(text));
        let mut attributes = Attributes::new(concept, fact);
        attributes.sign = Some(match document.attr(node, "sign") {
            Some("-") => Sign::Negative,
            _ => Sign::Positive,
        });
        attributes.format = document
            .attr(node, "format")
            .map(|f| strip_prefix(f).to_string());
        attributes.measure = document.attr(node, "unitref").map(str::to_string);
        attributes.scale = document.attr(node, "scale").map(str::to_string);
        attributes
    }
}
