//! Listing the facts already present in the fixture reference filing.

mod common;

use common::{catalog, parse, REFERENCE};
use taxotag::{FactValue, InlineTagger, Sign, TaxonomyCatalog};

#[test]
fn every_fact_is_listed_once() {
    let store = TaxonomyCatalog::empty();
    let tags = InlineTagger::new(&store).list_tags(&parse(REFERENCE));

    assert_eq!(
        tags.ids().collect::<Vec<_>>(),
        vec![
            "dei:EntityRegistrantNameFY2023",
            "dei:EntityFileNumberFY2023",
            "us-gaap:RevenuesFY2023",
            "us-gaap:NetIncomeLossFY2023",
            "us-gaap:OtherLiabilitiesCurrentI2023",
            "us-gaap:OtherLiabilitiesNoncurrentI2023",
            "dei:EntityRegistrantNameFY2023_Sub",
        ]
    );
}

#[test]
fn numeric_facts_carry_sign_unit_and_period() {
    let store = TaxonomyCatalog::empty();
    let tags = InlineTagger::new(&store).list_tags(&parse(REFERENCE));

    let net_loss = &tags.get("us-gaap:NetIncomeLossFY2023").unwrap().attributes;
    assert_eq!(net_loss.fact, FactValue::Decimal(45_000.0));
    assert_eq!(net_loss.sign, Some(Sign::Negative));
    assert_eq!(net_loss.measure.as_deref(), Some("usd"));
    assert_eq!(net_loss.period.as_deref(), Some("2023-01-01 to 2023-12-31"));

    let other = &tags.get("us-gaap:OtherLiabilitiesNoncurrentI2023").unwrap().attributes;
    assert_eq!(other.sign, Some(Sign::Positive));
    assert_eq!(other.period.as_deref(), Some("As of 2023-12-31"));
}

#[test]
fn listed_facts_are_enriched() {
    let store = catalog();
    let tags = InlineTagger::new(&store).list_tags(&parse(REFERENCE));

    let revenues = tags.get("us-gaap:RevenuesFY2023").unwrap();
    assert_eq!(revenues.tag(), "Revenues");
    assert_eq!(revenues.labels.label.as_deref(), Some("Revenues"));
    assert_eq!(revenues.references.publisher.as_deref(), Some("FASB"));

    let name = tags.get("dei:EntityRegistrantNameFY2023").unwrap();
    assert_eq!(name.attributes.data_type.as_deref(), Some("normalizedStringItemType"));
    assert_eq!(name.attributes.fact, FactValue::Text("Acme Holdings, Inc.".into()));
}
