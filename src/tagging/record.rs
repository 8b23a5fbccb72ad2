//! Tag records: the engine's output unit

use crate::error::TaggerResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use crate::taxonomy::ConceptReference as References;

/// Sign of a numeric fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

/// Value of a tagged fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    /// Monetary amount parsed from a grouped-digit string
    Number(i64),
    /// Numeric value of an existing inline fact
    Decimal(f64),
    Text(String),
}

impl FactValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            FactValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FactValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attributes {
    pub tag: String,
    pub fact: FactValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<Sign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    #[serde(default, rename = "Type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl Attributes {
    pub fn new(tag: impl Into<String>, fact: FactValue) -> Self {
        Self {
            tag: tag.into(),
            fact,
            sign: None,
            format: None,
            measure: None,
            scale: None,
            data_type: None,
            period: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Labels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl Labels {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.documentation.is_none()
    }
}

/// One tagged fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Carried as the collection key rather than inside the record
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "Attributes")]
    pub attributes: Attributes,
    #[serde(rename = "Labels")]
    pub labels: Labels,
    #[serde(rename = "References")]
    pub references: References,
    /// Reserved; always empty
    #[serde(rename = "Calculation", default)]
    pub calculation: BTreeMap<String, String>,
}

impl TagRecord {
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            attributes,
            labels: Labels::default(),
            references: References::default(),
            calculation: BTreeMap::new(),
        }
    }

    /// Concept name the record is tagged with
    pub fn tag(&self) -> &str {
        &self.attributes.tag
    }
}

/// A record paired with its id, for line-oriented output
#[derive(Serialize)]
struct TagLine<'a> {
    id: &'a str,
    #[serde(flatten)]
    record: &'a TagRecord,
}

/// Tag records of one run, keyed by id in insertion order.
///
/// Inserting a record whose id is already present replaces the earlier
/// record in place, so ids stay unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TagCollection {
    records: IndexMap<String, TagRecord>,
}

impl TagCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; returns `true` when the id was new.
    pub fn insert(&mut self, record: TagRecord) -> bool {
        self.records.insert(record.id.clone(), record).is_none()
    }

    pub fn get(&self, id: &str) -> Option<&TagRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagRecord> {
        self.records.values()
    }

    /// Records tagged with the given concept, in insertion order
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TagRecord> + 'a {
        self.records.values().filter(move |r| r.tag() == tag)
    }

    /// One JSON object keyed by tag id
    pub fn to_json_pretty(&self) -> TaggerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One `{"id": ..., "Attributes": ...}` object per line
    pub fn to_json_lines(&self) -> TaggerResult<String> {
        let mut out = String::new();
        for record in self.records.values() {
            out.push_str(&serde_json::to_string(&TagLine {
                id: &record.id,
                record,
            })?);
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_record_serializes_with_sign() {
        let mut attributes = Attributes::new("Revenues", FactValue::Number(-1234));
        attributes.sign = Some(Sign::Negative);
        let record = TagRecord::new("12-4-Revenues", attributes);

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "Attributes": {"Tag": "Revenues", "Fact": -1234, "Sign": "Negative"},
                "Labels": {},
                "References": {},
                "Calculation": {}
            })
        );
    }

    #[test]
    fn text_record_has_no_sign() {
        let record = TagRecord::new("x", Attributes::new("EntityRegistrantName", FactValue::Text("Acme".into())));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["Attributes"], json!({"Tag": "EntityRegistrantName", "Fact": "Acme"}));
    }

    #[test]
    fn duplicate_id_replaces_record() {
        let mut tags = TagCollection::new();
        assert!(tags.insert(TagRecord::new("a", Attributes::new("One", FactValue::Number(1)))));
        assert!(tags.insert(TagRecord::new("b", Attributes::new("Two", FactValue::Number(2)))));
        assert!(!tags.insert(TagRecord::new("a", Attributes::new("Three", FactValue::Number(3)))));

        assert_eq!(tags.len(), 2);
        assert_eq!(tags.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(tags.get("a").unwrap().tag(), "Three");
    }

    #[test]
    fn collection_serializes_keyed_by_id() {
        let mut tags = TagCollection::new();
        tags.insert(TagRecord::new("t1", Attributes::new("Assets", FactValue::Number(10))));

        let value: serde_json::Value = serde_json::from_str(&tags.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["t1"]["Attributes"]["Fact"], json!(10));
    }

    #[test]
    fn json_lines_carry_the_id() {
        let mut tags = TagCollection::new();
        tags.insert(TagRecord::new("t1", Attributes::new("Assets", FactValue::Number(10))));
        tags.insert(TagRecord::new("t2", Attributes::new("Liabilities", FactValue::Number(5))));

        let lines = tags.to_json_lines().unwrap();
        let parsed: Vec<serde_json::Value> = lines
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1]["id"], json!("t2"));
        assert_eq!(parsed[1]["Attributes"]["Tag"], json!("Liabilities"));
    }
}
