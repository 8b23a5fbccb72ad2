//! Taxonomy concept metadata

use serde::{Deserialize, Serialize};

/// Authoritative literature reference attached to a concept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConceptReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection: Option<String>,
}

/// A taxonomy element, keyed by its unprefixed name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default, rename = "type")]
    pub data_type: Option<String>,
    /// Date the concept was deprecated, if it was
    #[serde(default, rename = "deprecatedDate", alias = "deprecated")]
    pub deprecated: Option<String>,
    #[serde(default)]
    pub reference: Option<ConceptReference>,
}

impl Concept {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            documentation: None,
            data_type: None,
            deprecated: None,
            reference: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn with_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn with_reference(mut self, reference: ConceptReference) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}
