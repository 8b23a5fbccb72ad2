//! Lookup indices built from a reference filing
//!
//! `TableLookup` maps the title of every table row that carries a tagged
//! monetary value to that value's concept. `FactLookup` maps the rendered
//! value of each selected firm-specific fact to its concept name. Both are
//! plain maps: a later row or fact with the same key overwrites the earlier
//! association.

use crate::document::{Document, NodeId};
use crate::extract::ReferenceExtract;
use crate::text::{is_money, normalize, strip_prefix};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Inline element for numeric facts
const NUMERIC_FACT: &str = "ix:nonfraction";

/// Text → concept name, iterated in ascending key order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LookupTable {
    entries: BTreeMap<String, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `text` with `concept`, returning the concept it replaced.
    pub fn insert(&mut self, text: impl Into<String>, concept: impl Into<String>) -> Option<String> {
        self.entries.insert(text.into(), concept.into())
    }

    pub fn get(&self, text: &str) -> Option<&str> {
        self.entries.get(text).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The two lookups consulted while scanning a target document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupIndex {
    pub table: LookupTable,
    pub facts: LookupTable,
}

impl LookupIndex {
    /// Build both lookups.
    ///
    /// `FactLookup` is only populated when fact names are selected.
    pub fn build(reference: &Document, extract: Option<&ReferenceExtract>, selected: &[String]) -> Self {
        let table = Self::table_lookup(reference);
        let facts = match extract {
            Some(extract) if !selected.is_empty() => Self::fact_lookup(extract, selected),
            _ => LookupTable::new(),
        };
        info!(
            table_keys = table.len(),
            fact_keys = facts.len(),
            "lookup index built"
        );
        Self { table, facts }
    }

    /// Row titles of tagged monetary cells in the reference document's tables.
    pub fn table_lookup(reference: &Document) -> LookupTable {
        let mut lookup = LookupTable::new();
        let body = reference.body();

        for table in reference.find_all(body, "table") {
            for node in reference.descendants(table) {
                let Some(name) = reference.attr(node, "name") else {
                    continue;
                };
                let Some(raw) = reference.string(node) else {
                    continue;
                };
                if !reference.is_element(node, NUMERIC_FACT) || !is_money(&normalize(raw)) {
                    continue;
                }

                let concept = strip_prefix(name);
                match row_title(reference, node) {
                    Some(title) => {
                        if let Some(previous) = lookup.insert(title.clone(), concept) {
                            if previous != concept {
                                debug!(row = %title, previous = %previous, concept, "row title reassigned");
                            }
                        }
                    }
                    None => debug!(concept, node = %node, "monetary fact outside a titled row"),
                }
            }
        }

        lookup
    }

    /// Rendered values of the selected facts present in the extract.
    pub fn fact_lookup(extract: &ReferenceExtract, selected: &[String]) -> LookupTable {
        let selected: Vec<&str> = selected.iter().map(|s| strip_prefix(s)).collect();
        let mut lookup = LookupTable::new();
        for (name, fact) in extract.iter() {
            if selected.contains(&name) {
                lookup.insert(fact.value.clone(), name);
            }
        }
        lookup
    }
}

/// Normalized text of the first cell in the node's row
fn row_title(doc: &Document, node: NodeId) -> Option<String> {
    let row = doc.enclosing_row(node)?;
    let first_cell = doc.find_first(row, "td")?;
    let title = normalize(&doc.text(first_cell));
    (!title.is_empty()).then_some(title)
}
