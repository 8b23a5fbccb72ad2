//! Lenient HTML / XHTML reader built on quick-xml
//!
//! Inline filings are XHTML, but hand-edited reports routinely carry
//! HTML-isms: void elements without a closing slash, unquoted attributes,
//! named entities such as `&nbsp;`, and stray end tags. The reader keeps
//! going through all of them and records the source position of every
//! node so tags can be given positional identifiers.

use super::node::{Document, NodeId};
use super::DocumentParser;
use crate::error::{TaggerError, TaggerResult};
use indexmap::IndexMap;
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// Elements that never have content, closed or not
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Markup parser producing a [`Document`]
#[derive(Debug, Clone, Default)]
pub struct MarkupParser;

impl MarkupParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a file from disk
    pub fn parse_file(&self, path: impl AsRef<Path>) -> TaggerResult<Document> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| TaggerError::io(path, e))?;
        self.parse(&bytes)
    }

    pub fn parse_str(&self, source: &str) -> TaggerResult<Document> {
        let lines = LineIndex::new(source);
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut doc = Document::new();
        let mut open: Vec<(NodeId, String)> = Vec::new();

        loop {
            let before = reader.buffer_position() as usize;
            let (line, offset) = lines.locate(markup_start(source, before));
            let parent = open.last().map(|(id, _)| *id).unwrap_or_else(|| doc.root());

            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = element_name(e.name().as_ref());
                    let attributes = read_attributes(&e);
                    let id = doc.append_element(parent, name.clone(), attributes, line, offset);
                    if !VOID_ELEMENTS.contains(&name.as_str()) {
                        open.push((id, name));
                    }
                }
                Ok(Event::Empty(e)) => {
                    let name = element_name(e.name().as_ref());
                    let attributes = read_attributes(&e);
                    doc.append_element(parent, name, attributes, line, offset);
                }
                Ok(Event::End(e)) => {
                    let name = element_name(e.name().as_ref());
                    // Closing an outer element implicitly closes everything opened inside it
                    if let Some(depth) = open.iter().rposition(|(_, open_name)| *open_name == name) {
                        open.truncate(depth);
                    }
                }
                Ok(Event::Text(e)) => {
                    let raw = String::from_utf8_lossy(&e);
                    doc.append_text(parent, &decode_entities(&raw), line, offset);
                }
                Ok(Event::CData(e)) => {
                    let raw = String::from_utf8_lossy(&e);
                    doc.append_text(parent, &raw, line, offset);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    let (line, offset) = lines.locate(reader.buffer_position() as usize);
                    return Err(TaggerError::Markup(format!(
                        "line {}, column {}: {}",
                        line, offset, e
                    )));
                }
            }
        }

        Ok(doc)
    }
}

impl DocumentParser for MarkupParser {
    fn parse(&self, bytes: &[u8]) -> TaggerResult<Document> {
        let source = String::from_utf8_lossy(bytes);
        self.parse_str(&source)
    }
}

/// Position of the `<` opening the next event.
///
/// Depending on how the preceding text was consumed the reader may already
/// sit one byte past it.
fn markup_start(source: &str, pos: usize) -> usize {
    let bytes = source.as_bytes();
    if bytes.get(pos) != Some(&b'<') && pos > 0 && bytes.get(pos - 1) == Some(&b'<') {
        pos - 1
    } else {
        pos
    }
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_lowercase()
}

fn read_attributes(start: &BytesStart<'_>) -> IndexMap<String, String> {
    let mut attributes = IndexMap::new();
    for attr in start.html_attributes().with_checks(false).flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_lowercase();
        let raw = String::from_utf8_lossy(&attr.value);
        attributes.insert(key, decode_entities(&raw));
    }
    attributes
}

/// Resolve character and HTML5 named references; undecodable input is kept verbatim.
fn decode_entities(raw: &str) -> String {
    match unescape_with(raw, resolve_html5_entity) {
        Ok(text) => text.into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// Byte offset to (line, column) lookup
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn locate(&self, pos: usize) -> (usize, usize) {
        let line = match self.starts.binary_search(&pos) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        (line + 1, pos - self.starts[line])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Document {
        MarkupParser::new().parse_str(source).unwrap()
    }

    #[test]
    fn element_names_and_attributes_are_lowercased() {
        let doc = parse(r#"<body><ix:nonFraction name="us-gaap:Assets" contextRef="c1">1,000</ix:nonFraction></body>"#);
        let fact = doc.find_first(doc.root(), "ix:nonfraction").unwrap();

        assert_eq!(doc.attr(fact, "name"), Some("us-gaap:Assets"));
        assert_eq!(doc.attr(fact, "contextref"), Some("c1"));
        assert_eq!(doc.string(fact), Some("1,000"));
    }

    #[test]
    fn positions_are_line_and_column() {
        let doc = parse("<body>\n  <p>One</p><p>Two</p>\n</body>");
        let paragraphs = doc.find_all(doc.root(), "p");

        assert_eq!(doc.position(paragraphs[0]), (2, 2));
        assert_eq!(doc.position(paragraphs[1]), (2, 12));
    }

    #[test]
    fn named_entities_are_decoded() {
        let doc = parse("<p>Cash&nbsp;and&#160;equivalents &amp; more</p>");
        let p = doc.find_first(doc.root(), "p").unwrap();

        assert_eq!(doc.string(p), Some("Cash\u{a0}and\u{a0}equivalents & more"));
    }

    #[test]
    fn void_elements_do_not_swallow_siblings() {
        let doc = parse("<body><p>Line one<br>Line two</p><p>Next</p></body>");
        let body = doc.body();
        let paragraphs = doc.find_all(body, "p");

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(doc.parent(paragraphs[1]), Some(body));
    }

    #[test]
    fn unclosed_cells_are_closed_by_their_row() {
        let doc = parse("<table><tr><td>Revenues<td>1,000</tr><tr><td>Costs</td></tr></table>");
        let rows = doc.find_all(doc.root(), "tr");

        assert_eq!(rows.len(), 2);
        assert_eq!(doc.find_all(rows[1], "td").len(), 1);
    }

    #[test]
    fn whitespace_text_nodes_are_kept() {
        let doc = parse("<td>\n  <span>Revenues</span>\n</td>");
        let td = doc.find_first(doc.root(), "td").unwrap();

        assert_eq!(doc.string(td), None);
        assert_eq!(doc.children(td).len(), 3);
    }
}
