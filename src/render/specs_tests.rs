//! Tests for the specification table.

use super::*;
use crate::graph::ResourceIndex;
use crate::localize::DisplayText;
use crate::test_utils::{PayloadBuilder, PayloadFixture};
use anyhow::Result;
use serde_json::{Value, json};

fn build(payload: &Value, language: &str) -> Result<SpecTable> {
    let index = ResourceIndex::from_payload(payload)?;
    let options = RenderOptions::for_language(language);
    Ok(SpecificationTableRenderer::new(&index, &options).build()?)
}

fn sections_payload() -> Value {
    PayloadBuilder::new("features", json!({"id": "5", "links": {"sections": ["30", "31"]}}))
        .with_linked_all(
            "sections",
            [
                json!({
                    "id": "30",
                    "number": {"en": "4.1"},
                    "name": {"en": "Flex Items", "de": "Flex-Elemente"},
                    "subpath": {"en": "#flex-items", "de": "#flex-elemente"},
                    "note": {"en": "Defines flex items."},
                    "links": {"specification": "50"}
                }),
                json!({
                    "id": "31",
                    "number": null,
                    "name": {"en": "Ordering"},
                    "subpath": {"en": "#order"},
                    "note": null,
                    "links": {"specification": "51"}
                }),
            ],
        )
        .with_linked_all(
            "specifications",
            [
                json!({
                    "id": "50",
                    "name": {"en": "CSS Flexible Box Layout Module", "de": "CSS Flexbox"},
                    "uri": {"en": "https://drafts.csswg.org/css-flexbox-1/"},
                    "links": {"maturity": "60"}
                }),
                json!({"id": "51", "name": "CSS3 Flexbox", "uri": null, "links": {"maturity": "61"}}),
            ],
        )
        .with_linked("maturities", json!({"id": "60", "slug": "ED", "name": {"en": "Editor's Draft"}}))
        .build()
}

#[test]
fn test_sections_linkage() -> Result<()> {
    let table = build(&sections_payload(), "en")?;
    assert_eq!(table.rows.len(), 2);

    let first = &table.rows[0];
    assert_eq!(first.label(), "CSS Flexible Box Layout Module 4.1 Flex Items");
    assert_eq!(first.href.as_deref(), Some("https://drafts.csswg.org/css-flexbox-1/#flex-items"));
    assert_eq!(first.maturity_class, "maturity-ED");
    assert_eq!(first.maturity, DisplayText::Text("Editor's Draft".into()));
    assert_eq!(first.comment, Some(DisplayText::Text("Defines flex items.".into())));
    Ok(())
}

#[test]
fn test_each_half_of_href_resolves_independently() -> Result<()> {
    // The specification URI only has "en", the subpath has "de"
    let table = build(&sections_payload(), "de")?;
    let first = &table.rows[0];

    assert_eq!(first.href.as_deref(), Some("https://drafts.csswg.org/css-flexbox-1/#flex-elemente"));
    assert_eq!(first.label(), "CSS Flexbox 4.1 Flex-Elemente");
    Ok(())
}

#[test]
fn test_missing_maturity_and_uri() -> Result<()> {
    let table = build(&sections_payload(), "en")?;
    let second = &table.rows[1];

    assert_eq!(second.specification, DisplayText::Code("CSS3 Flexbox".into()));
    assert_eq!(second.section, "Ordering");
    assert_eq!(second.href, None);
    assert_eq!(second.maturity_class, UNKNOWN_MATURITY_CLASS);
    assert_eq!(second.maturity, DisplayText::Placeholder("unknown".into()));
    assert_eq!(second.comment, None);
    Ok(())
}

#[test]
fn test_references_linkage() -> Result<()> {
    let table = build(&PayloadFixture::spec_references().payload, "en")?;
    assert_eq!(table.rows.len(), 2);

    // Reference note wins over the section note
    assert_eq!(table.rows[0].comment, Some(DisplayText::Text("Initial definition.".into())));
    assert_eq!(table.rows[1].comment, Some(DisplayText::Text("Fallback comment.".into())));
    assert_eq!(table.rows[1].href.as_deref(), Some("https://drafts.csswg.org/css-flexbox-1/#flex-containers"));
    assert_eq!(table.rows[1].maturity_class, "maturity-CR");
    Ok(())
}

#[test]
fn test_missing_section_skips_row() -> Result<()> {
    let payload = json!({
        "features": {"id": "5", "links": {"sections": ["30", "99"]}},
        "linked": {"sections": [{"id": "30", "name": {"en": "Intro"}, "links": {"specification": "50"}}]}
    });
    let table = build(&payload, "en")?;

    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].specification, DisplayText::Placeholder("none".into()));
    assert_eq!(table.rows[0].href, None);
    Ok(())
}

#[test]
fn test_no_linkage_is_empty() -> Result<()> {
    let table = build(&json!({"features": {"id": "5"}}), "en")?;
    assert!(table.rows.is_empty());
    Ok(())
}

#[test]
fn test_collection_has_no_spec_table() {
    let err = build(&json!({"features": [{"id": "5"}]}), "en").unwrap_err();
    assert!(matches!(err.downcast_ref::<BrowseError>(), Some(BrowseError::NoPrimary)));
}

#[test]
fn test_rendered_html() -> Result<()> {
    let index = ResourceIndex::from_payload(&sections_payload())?;
    let html = render_spec_table(&index, &RenderOptions::default())?;

    assert!(html.contains("<th>Specification</th><th>Status</th><th>Comment</th>"));
    assert!(html.contains(
        "<a href=\"https://drafts.csswg.org/css-flexbox-1/#flex-items\">CSS Flexible Box Layout Module<br><small>4.1 Flex Items</small></a>"
    ));
    assert!(html.contains("<span class=\"maturity-ED\">Editor&#x27;s Draft</span>"));
    assert!(html.contains("<code>CSS3 Flexbox</code><br><small>Ordering</small>"));
    Ok(())
}
