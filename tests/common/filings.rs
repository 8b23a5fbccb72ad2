//! Fixture filings

use std::path::{Path, PathBuf};
use taxotag::{Concept, Document, MarkupParser, TaxonomyCatalog};
use taxotag::taxonomy::ConceptReference;

/// Inline-XBRL reference filing.
///
/// "Other liabilities" titles two rows; the later (noncurrent) one wins.
/// The registrant name is reported twice, the second time under a
/// dimensional context.
pub const REFERENCE: &str = r#"<html><body>
<div style="display:none"><ix:header><ix:resources>
<xbrli:context id="FY2023"><xbrli:entity><xbrli:identifier scheme="http://www.sec.gov/CIK">0000123456</xbrli:identifier></xbrli:entity><xbrli:period><xbrli:startDate>2023-01-01</xbrli:startDate><xbrli:endDate>2023-12-31</xbrli:endDate></xbrli:period></xbrli:context>
<xbrli:context id="FY2023_Sub"><xbrli:entity><xbrli:identifier scheme="http://www.sec.gov/CIK">0000123456</xbrli:identifier><xbrli:segment><xbrldi:explicitMember dimension="dei:LegalEntityAxis">acme:SubsidiaryMember</xbrldi:explicitMember></xbrli:segment></xbrli:entity><xbrli:period><xbrli:startDate>2023-01-01</xbrli:startDate><xbrli:endDate>2023-12-31</xbrli:endDate></xbrli:period></xbrli:context>
<xbrli:context id="I2023"><xbrli:entity><xbrli:identifier scheme="http://www.sec.gov/CIK">0000123456</xbrli:identifier></xbrli:entity><xbrli:period><xbrli:instant>2023-12-31</xbrli:instant></xbrli:period></xbrli:context>
</ix:resources></ix:header></div>
<p>Registrant: <ix:nonNumeric name="dei:EntityRegistrantName" contextRef="FY2023">Acme Holdings, Inc.</ix:nonNumeric></p>
<p>Commission file number <ix:nonNumeric name="dei:EntityFileNumber" contextRef="FY2023">001-12345</ix:nonNumeric></p>
<table>
<tr><td>Total revenues</td><td>$</td><td><ix:nonFraction name="us-gaap:Revenues" contextRef="FY2023" unitRef="usd" decimals="0">1,200,000</ix:nonFraction></td></tr>
<tr><td>Net loss</td><td>(<ix:nonFraction name="us-gaap:NetIncomeLoss" contextRef="FY2023" unitRef="usd" decimals="0" sign="-">45,000</ix:nonFraction>)</td></tr>
<tr><td>Other liabilities</td><td><ix:nonFraction name="us-gaap:OtherLiabilitiesCurrent" contextRef="I2023" unitRef="usd" decimals="0">15,000</ix:nonFraction></td></tr>
<tr><td>Other liabilities</td><td><ix:nonFraction name="us-gaap:OtherLiabilitiesNoncurrent" contextRef="I2023" unitRef="usd" decimals="0">20,000</ix:nonFraction></td></tr>
</table>
<p>Subsidiary: <ix:nonNumeric name="dei:EntityRegistrantName" contextRef="FY2023_Sub">Acme Subsidiary LLC</ix:nonNumeric></p>
</body></html>"#;

/// Untagged document restating the reference tables.
///
/// Rows start on lines 4 to 7, each title cell at offset 4.
pub const TARGET: &str = r#"<html><body>
<p>Acme Holdings, Inc.</p>
<table>
<tr><td>Total revenues</td><td>1,350,000</td><td>1,200,000</td></tr>
<tr><td>Net loss</td><td>(52,000)</td><td>(45,000)</td></tr>
<tr><td>Other liabilities</td><td>20,000</td></tr>
<tr><td>Depreciation</td><td>7,000</td></tr>
</table>
</body></html>"#;

pub fn parse(source: &str) -> Document {
    MarkupParser::new()
        .parse_str(source)
        .expect("fixture should parse")
}

fn concepts() -> Vec<Concept> {
    vec![
        Concept::new("us-gaap:Revenues")
            .with_label("Revenues")
            .with_documentation("Amount of revenue recognized from goods sold and services rendered.")
            .with_type("monetaryItemType")
            .with_reference(ConceptReference {
                publisher: Some("FASB".into()),
                name: Some("Accounting Standards Codification".into()),
                number: Some("606".into()),
                section: Some("10".into()),
                subsection: None,
            }),
        Concept::new("us-gaap:NetIncomeLoss")
            .with_label("Net Income (Loss) [Abstract]")
            .with_type("monetaryItemType"),
        Concept::new("dei:EntityRegistrantName")
            .with_label("Entity Registrant Name")
            .with_type("normalizedStringItemType"),
    ]
}

pub fn catalog() -> TaxonomyCatalog {
    TaxonomyCatalog::from_concepts(concepts())
}

/// The fixture catalog in its on-disk JSON form
pub fn catalog_json() -> String {
    serde_json::to_string_pretty(&serde_json::json!({ "concepts": concepts() }))
        .expect("catalog should serialize")
}

/// Write `contents` to `dir/name`, returning the path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("fixture should be writable");
    path
}
