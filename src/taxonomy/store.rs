//! Concept metadata stores

use super::concept::Concept;
use crate::document::MarkupParser;
use crate::error::{TaggerError, TaggerResult};
use crate::text::{clean_label, detach_words, strip_prefix};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Read-only concept lookup used while assembling tags.
///
/// Lookups are by unprefixed concept name; callers strip prefixes first.
pub trait MetadataStore {
    fn lookup(&self, name: &str) -> Option<&Concept>;
}

/// On-disk catalog layout: either `{ concepts: [...] }` or a bare list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { concepts: Vec<Concept> },
    Bare(Vec<Concept>),
}

impl CatalogFile {
    fn into_concepts(self) -> Vec<Concept> {
        match self {
            CatalogFile::Wrapped { concepts } | CatalogFile::Bare(concepts) => concepts,
        }
    }
}

/// In-memory taxonomy catalog
#[derive(Debug, Clone, Default)]
pub struct TaxonomyCatalog {
    concepts: HashMap<String, Concept>,
}

impl TaxonomyCatalog {
    /// A catalog with no concepts; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from concepts.
    ///
    /// Deprecated concepts are skipped, bracketed qualifiers are removed
    /// from labels, and the first declaration of a name wins.
    pub fn from_concepts(concepts: impl IntoIterator<Item = Concept>) -> Self {
        let mut catalog = Self::empty();
        for mut concept in concepts {
            if concept.is_deprecated() {
                continue;
            }
            concept.name = strip_prefix(&concept.name).to_string();
            concept.label = concept.label.as_deref().map(clean_label);
            catalog
                .concepts
                .entry(concept.name.clone())
                .or_insert(concept);
        }
        catalog
    }

    pub fn from_json_str(source: &str) -> TaggerResult<Self> {
        let file: CatalogFile = serde_json::from_str(source)?;
        Ok(Self::from_concepts(file.into_concepts()))
    }

    pub fn from_yaml_str(source: &str) -> TaggerResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(source)?;
        Ok(Self::from_concepts(file.into_concepts()))
    }

    /// Load every `xs:element` declaration from the `.xsd` files in a folder.
    ///
    /// Schemas carry no documentation or references, so labels and types are
    /// derived from the declared names.
    pub fn from_xsd_dir(dir: impl AsRef<Path>) -> TaggerResult<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| TaggerError::io(dir, e))?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("xsd")))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(TaggerError::Taxonomy(format!(
                "no .xsd files in {}",
                dir.display()
            )));
        }

        let parser = MarkupParser::new();
        let mut concepts = Vec::new();
        for path in &paths {
            let schema = parser
                .parse_file(path)
                .map_err(|e| TaggerError::Taxonomy(format!("{}: {}", path.display(), e)))?;
            let before = concepts.len();
            for node in schema.descendants(schema.root()) {
                let is_element_decl = schema.name(node).map(strip_prefix) == Some("element");
                let Some(name) = schema.attr(node, "name").filter(|_| is_element_decl) else {
                    continue;
                };
                let mut concept = Concept::new(name).with_label(detach_words(name));
                if let Some(data_type) = schema.attr(node, "type") {
                    concept = concept.with_type(detach_words(data_type));
                }
                concepts.push(concept);
            }
            debug!(path = %path.display(), elements = concepts.len() - before, "read schema");
        }

        Ok(Self::from_concepts(concepts))
    }

    /// Load from a folder of schemas or a `.json` / `.yaml` / `.yml` catalog.
    pub fn from_path(path: impl AsRef<Path>) -> TaggerResult<Self> {
        let path = path.as_ref();
        let catalog = if path.is_dir() {
            Self::from_xsd_dir(path)?
        } else {
            let source = std::fs::read_to_string(path).map_err(|e| TaggerError::io(path, e))?;
            match path.extension().and_then(|e| e.to_str()) {
                Some("json") => Self::from_json_str(&source)?,
                Some("yaml") | Some("yml") => Self::from_yaml_str(&source)?,
                _ => {
                    return Err(TaggerError::Taxonomy(format!(
                        "unsupported taxonomy resource: {}",
                        path.display()
                    )))
                }
            }
        };
        info!(path = %path.display(), concepts = catalog.len(), "taxonomy loaded");
        Ok(catalog)
    }

    pub fn insert(&mut self, concept: Concept) {
        self.concepts.insert(concept.name.clone(), concept);
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

impl MetadataStore for TaxonomyCatalog {
    fn lookup(&self, name: &str) -> Option<&Concept> {
        self.concepts.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::ConceptReference;

    #[test]
    fn json_catalog_loads_concepts() {
        let catalog = TaxonomyCatalog::from_json_str(
            r#"{"concepts": [
                {"name": "Assets", "label": "Assets", "documentation": "Sum of assets.",
                 "type": "monetaryItemType",
                 "reference": {"Publisher": "FASB", "Number": "210", "Section": "10", "Subsection": "45"}}
            ]}"#,
        )
        .unwrap();

        let assets = catalog.lookup("Assets").unwrap();
        assert_eq!(assets.documentation.as_deref(), Some("Sum of assets."));
        assert_eq!(
            assets.reference,
            Some(ConceptReference {
                publisher: Some("FASB".into()),
                name: None,
                number: Some("210".into()),
                section: Some("10".into()),
                subsection: Some("45".into()),
            })
        );
    }

    #[test]
    fn deprecated_concepts_are_skipped() {
        let catalog = TaxonomyCatalog::from_yaml_str(
            "- name: OldConcept\n  deprecatedDate: '2019-01-31'\n- name: Revenues\n  label: Revenues [Abstract]\n",
        )
        .unwrap();

        assert!(catalog.lookup("OldConcept").is_none());
        assert_eq!(catalog.lookup("Revenues").unwrap().label.as_deref(), Some("Revenues"));
    }

    #[test]
    fn prefixed_names_are_stored_unprefixed() {
        let catalog = TaxonomyCatalog::from_concepts([Concept::new("us-gaap:Liabilities")]);
        assert!(catalog.lookup("Liabilities").is_some());
    }

    #[test]
    fn first_declaration_wins() {
        let catalog = TaxonomyCatalog::from_concepts([
            Concept::new("Assets").with_label("First"),
            Concept::new("Assets").with_label("Second"),
        ]);
        assert_eq!(catalog.lookup("Assets").unwrap().label.as_deref(), Some("First"));
    }

    #[test]
    fn xsd_elements_are_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("us-gaap-2020-01-31.xsd"),
            r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="AccountsPayableCurrent" type="xbrli:monetaryItemType" substitutionGroup="xbrli:item"/>
  <xs:element name="EntityRegistrantName" type="xbrli:stringItemType"/>
</xs:schema>"#,
        )
        .unwrap();

        let catalog = TaxonomyCatalog::from_path(dir.path()).unwrap();
        let payable = catalog.lookup("AccountsPayableCurrent").unwrap();
        assert_eq!(payable.label.as_deref(), Some("Accounts Payable Current"));
        assert_eq!(payable.data_type.as_deref(), Some("monetary Item Type"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn empty_schema_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TaxonomyCatalog::from_xsd_dir(dir.path()),
            Err(TaggerError::Taxonomy(_))
        ));
    }
}
