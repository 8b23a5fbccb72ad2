//! XBRL contexts declared in an inline filing's hidden header

use crate::document::{Document, NodeId};
use crate::text::strip_prefix;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Reporting period of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Duration { start: NaiveDate, end: NaiveDate },
    Instant(NaiveDate),
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Duration { start, end } => write!(f, "{} to {}", start, end),
            Period::Instant(date) => write!(f, "As of {}", date),
        }
    }
}

/// One `xbrli:context`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XbrlContext {
    pub id: String,
    pub period: Option<Period>,
    /// Whether the context is qualified by dimension members
    pub dimensional: bool,
}

/// Contexts by id
#[derive(Debug, Clone, Default)]
pub struct ContextMap {
    contexts: HashMap<String, XbrlContext>,
}

impl ContextMap {
    /// Collect every context element in the document.
    pub fn from_document(doc: &Document) -> Self {
        let mut contexts = HashMap::new();
        for node in doc.descendants(doc.root()) {
            if local_name(doc, node) != Some("context") {
                continue;
            }
            let Some(id) = doc.attr(node, "id") else {
                continue;
            };
            let context = XbrlContext {
                id: id.to_string(),
                period: read_period(doc, node),
                dimensional: first_local(doc, node, "segment").is_some()
                    || first_local(doc, node, "scenario").is_some(),
            };
            contexts.insert(context.id.clone(), context);
        }
        Self { contexts }
    }

    pub fn get(&self, id: &str) -> Option<&XbrlContext> {
        self.contexts.get(id)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

fn local_name(doc: &Document, node: NodeId) -> Option<&str> {
    doc.name(node).map(strip_prefix)
}

fn first_local(doc: &Document, node: NodeId, name: &str) -> Option<NodeId> {
    doc.descendants(node)
        .into_iter()
        .find(|&n| local_name(doc, n) == Some(name))
}

fn read_date(doc: &Document, context: NodeId, name: &str) -> Option<NaiveDate> {
    let node = first_local(doc, context, name)?;
    let text = doc.text(node);
    match NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(element = name, value = text.trim(), error = %e, "unparseable context date");
            None
        }
    }
}

fn read_period(doc: &Document, context: NodeId) -> Option<Period> {
    if let (Some(start), Some(end)) = (
        read_date(doc, context, "startdate"),
        read_date(doc, context, "enddate"),
    ) {
        return Some(Period::Duration { start, end });
    }
    read_date(doc, context, "instant").map(Period::Instant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MarkupParser;

    const HEADER: &str = r#"<html><body><ix:header><ix:resources>
<xbrli:context id="FY2020">
  <xbrli:entity><xbrli:identifier scheme="http://www.sec.gov/CIK">0000001</xbrli:identifier></xbrli:entity>
  <xbrli:period><xbrli:startDate>2020-01-01</xbrli:startDate><xbrli:endDate>2020-12-31</xbrli:endDate></xbrli:period>
</xbrli:context>
<xbrli:context id="AsOf2020">
  <xbrli:entity>
    <xbrli:identifier scheme="http://www.sec.gov/CIK">0000001</xbrli:identifier>
    <xbrli:segment><xbrldi:explicitMember dimension="us-gaap:StatementClassOfStockAxis">us-gaap:CommonStockMember</xbrldi:explicitMember></xbrli:segment>
  </xbrli:entity>
  <xbrli:period><xbrli:instant>2020-12-31</xbrli:instant></xbrli:period>
</xbrli:context>
</ix:resources></ix:header></body></html>"#;

    #[test]
    fn duration_and_instant_periods_are_read() {
        let doc = MarkupParser::new().parse_str(HEADER).unwrap();
        let contexts = ContextMap::from_document(&doc);

        assert_eq!(contexts.len(), 2);
        let fy = contexts.get("FY2020").unwrap();
        assert_eq!(fy.period.unwrap().to_string(), "2020-01-01 to 2020-12-31");
        assert!(!fy.dimensional);

        let as_of = contexts.get("AsOf2020").unwrap();
        assert_eq!(as_of.period.unwrap().to_string(), "As of 2020-12-31");
        assert!(as_of.dimensional);
    }

    #[test]
    fn malformed_dates_leave_period_unset() {
        let doc = MarkupParser::new()
            .parse_str(r#"<xbrli:context id="c"><xbrli:period><xbrli:instant>31/12/2020</xbrli:instant></xbrli:period></xbrli:context>"#)
            .unwrap();
        let contexts = ContextMap::from_document(&doc);

        assert_eq!(contexts.get("c").unwrap().period, None);
    }
}
