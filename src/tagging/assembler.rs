//! Tag record assembly for matched nodes

use super::record::{Attributes, FactValue, Sign, TagCollection, TagRecord};
use crate::document::{Document, NodeId};
use crate::taxonomy::MetadataStore;
use crate::text::{is_money, normalize, parse_money};
use tracing::{debug, trace};

/// Builds tag records and registers them in a collection
#[derive(Clone, Copy)]
pub struct TagAssembler<'a> {
    store: &'a dyn MetadataStore,
}

impl<'a> TagAssembler<'a> {
    pub fn new(store: &'a dyn MetadataStore) -> Self {
        Self { store }
    }

    /// The node's own `id` attribute, or `"{line}-{offset}-{concept}"`.
    pub fn tag_id(doc: &Document, node: NodeId, concept: &str) -> String {
        match doc.attr(node, "id") {
            Some(id) => id.to_string(),
            None => {
                let (line, offset) = doc.position(node);
                format!("{}-{}-{}", line, offset, concept)
            }
        }
    }

    /// Signed amount for monetary text, otherwise the text itself with no sign.
    ///
    /// Monetary text too large for an `i64` is kept as text.
    pub fn fact_value(text: &str) -> (FactValue, Option<Sign>) {
        match parse_money(text) {
            Some((amount, sign)) => (FactValue::Number(amount), Some(sign)),
            None => (FactValue::Text(text.to_string()), None),
        }
    }

    /// Build the record for `node` tagged with `concept`.
    ///
    /// `text` is the node's normalized string.
    pub fn assemble(&self, doc: &Document, node: NodeId, concept: &str, text: &str) -> TagRecord {
        let (fact, sign) = Self::fact_value(text);
        let mut attributes = Attributes::new(concept, fact);
        attributes.sign = sign;

        let mut record = TagRecord::new(Self::tag_id(doc, node, concept), attributes);
        self.enrich(&mut record);
        record
    }

    /// Copy label, documentation, type and references from the store.
    ///
    /// A concept the store does not know leaves the record as it is.
    pub fn enrich(&self, record: &mut TagRecord) {
        let Some(concept) = self.store.lookup(&record.attributes.tag) else {
            debug!(concept = %record.attributes.tag, "no taxonomy metadata");
            return;
        };
        record.labels.label = concept.label.clone();
        record.labels.documentation = concept.documentation.clone();
        if record.attributes.data_type.is_none() {
            record.attributes.data_type = concept.data_type.clone();
        }
        if let Some(reference) = &concept.reference {
            record.references = reference.clone();
        }
    }

    /// Assemble and insert a record, returning its id.
    pub fn register(
        &self,
        doc: &Document,
        node: NodeId,
        concept: &str,
        text: &str,
        tags: &mut TagCollection,
    ) -> String {
        let record = self.assemble(doc, node, concept, text);
        let id = record.id.clone();
        trace!(id = %id, concept, "tag registered");
        tags.insert(record);
        id
    }

    /// Tag every monetary cell of the row enclosing `node` with `concept`.
    ///
    /// Returns the number of cells tagged. A node outside any row tags
    /// nothing.
    pub fn cascade_row(
        &self,
        doc: &Document,
        node: NodeId,
        concept: &str,
        tags: &mut TagCollection,
    ) -> usize {
        let Some(row) = doc.enclosing_row(node) else {
            return 0;
        };

        let mut tagged = 0;
        for &cell in doc.children(row) {
            if doc.name(cell).is_none() {
                continue;
            }
            let Some(raw) = doc.string(cell) else {
                continue;
            };
            let text = normalize(raw);
            if is_money(&text) {
                self.register(doc, cell, concept, &text, tags);
                tagged += 1;
            }
        }
        tagged
    }
}
