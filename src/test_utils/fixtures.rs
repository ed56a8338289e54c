//! Canned payloads shared by unit and integration tests.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

use super::builder::{PayloadBuilder, browser, feature, support, version, with_attrs};

/// A named payload that can be written to disk.
#[derive(Clone, Debug)]
pub struct PayloadFixture {
    pub name: String,
    pub payload: Value,
}

impl PayloadFixture {
    /// Feature view of `flexbox` with two tabs, nested children, and notes.
    ///
    /// Tree: 5 (flexbox) → 6 (flex-wrap) → 8 (wrap-reverse), 5 → 7 (flex-flow).
    /// Feature 7 is listed in `compat_table.supports` but has no supports.
    pub fn feature_view() -> Self {
        let payload = PayloadBuilder::new("features", feature("5", "flexbox", &["6", "7"], &["10", "11"]))
            .with_linked_all(
                "features",
                [
                    with_attrs(feature("6", "flex-wrap", &["8"], &["12"]), json!({"experimental": true})),
                    feature("7", "flex-flow", &[], &[]),
                    with_attrs(feature("8", "wrap-reverse", &[], &["13"]), json!({"standardized": false})),
                ],
            )
            .with_linked_all("browsers", [browser("1", "Firefox"), browser("2", "Chrome"), browser("3", "Safari Mobile")])
            .with_linked_all(
                "versions",
                [
                    with_attrs(
                        version("20", "4.0", "1"),
                        json!({"release_notes_uri": {"en": "https://developer.mozilla.org/Firefox/Releases/4"}}),
                    ),
                    version("21", "current", "2"),
                    version("22", "7.0", "3"),
                ],
            )
            .with_linked_all(
                "supports",
                [
                    support("10", "no", "20", "5"),
                    with_attrs(
                        support("11", "yes", "21", "5"),
                        json!({"prefix": "-webkit-", "prefix_mandatory": true, "note": {"en": "Needs the prefix until 29."}}),
                    ),
                    with_attrs(support("12", "partial", "20", "6"), json!({"note": {"en": "Only single-line."}})),
                    support("13", "yes", "22", "8"),
                ],
            )
            .with_tabs(&[("Desktop Browsers", &["1", "2"]), ("Mobile Browsers", &["3"])])
            .with_supports("5", "1", &["10"])
            .with_supports("5", "2", &["11"])
            .with_supports("6", "1", &["12"])
            .with_empty_supports("7")
            .with_supports("8", "3", &["13"])
            .with_notes(&[("11", 1), ("12", 2)])
            .with_links(json!({
                "features.children": {"type": "features", "href": "https://browsercompat.herokuapp.com/api/v1/features/{features.children}"},
                "supports.version": {"type": "versions", "href": "https://browsercompat.herokuapp.com/api/v1/versions/{supports.version}"}
            }))
            .build();

        Self {
            name: "feature_view".to_string(),
            payload,
        }
    }

    /// Feature linked to specifications through references.
    pub fn spec_references() -> Self {
        let payload = PayloadBuilder::new(
            "features",
            json!({"id": "5", "name": {"en": "flexbox"}, "links": {"references": ["40", "41"]}}),
        )
        .with_linked_all(
            "references",
            [
                json!({"id": "40", "note": {"en": "Initial definition."}, "links": {"feature": "5", "section": "30"}}),
                json!({"id": "41", "note": null, "links": {"feature": "5", "section": "31"}}),
            ],
        )
        .with_linked_all(
            "sections",
            [
                json!({
                    "id": "30",
                    "number": {"en": "2"},
                    "name": {"en": "Flex Layout Box Model"},
                    "subpath": {"en": "#box-model"},
                    "note": {"en": "Section comment."},
                    "links": {"specification": "50"}
                }),
                json!({
                    "id": "31",
                    "number": {"en": "3"},
                    "name": {"en": "Flex Containers"},
                    "subpath": {"en": "#flex-containers"},
                    "note": {"en": "Fallback comment."},
                    "links": {"specification": "50"}
                }),
            ],
        )
        .with_linked(
            "specifications",
            json!({
                "id": "50",
                "slug": "css3-flexbox",
                "mdn_key": "CSS3 Flexbox",
                "name": {"en": "CSS Flexible Box Layout Module"},
                "uri": {"en": "https://drafts.csswg.org/css-flexbox-1/"},
                "links": {"maturity": "60"}
            }),
        )
        .with_linked("maturities", json!({"id": "60", "slug": "CR", "name": {"en": "Candidate Recommendation"}}))
        .build();

        Self {
            name: "spec_references".to_string(),
            payload,
        }
    }

    /// First page of a browser list with a second page pending.
    pub fn browser_page() -> Self {
        let payload = json!({
            "browsers": [browser("1", "Firefox"), browser("2", "Chrome")],
            "meta": {"pagination": {"browsers": {
                "previous": null,
                "next": "https://browsercompat.herokuapp.com/api/v1/browsers?page=2",
                "count": 3
            }}}
        });
        Self {
            name: "browser_page".to_string(),
            payload,
        }
    }

    /// Second and last page of the browser list.
    pub fn browser_page_two() -> Self {
        let payload = json!({
            "browsers": [browser("3", "Safari")],
            "meta": {"pagination": {"browsers": {
                "previous": "https://browsercompat.herokuapp.com/api/v1/browsers?page=1",
                "next": null,
                "count": 3
            }}}
        });
        Self {
            name: "browser_page_two".to_string(),
            payload,
        }
    }

    /// Serialized payload text.
    pub fn to_json(&self) -> String {
        self.payload.to_string()
    }

    /// Write the payload to `<dir>/<name>.json`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.json", self.name));
        let content = serde_json::to_string_pretty(&self.payload)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}
