//! Fluent builder for JSON:API payloads used in tests.

use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Builds a feature view (or any detail) payload piece by piece.
///
/// ```rust,no_run
/// use wpc_browse::test_utils::{PayloadBuilder, browser, feature};
///
/// let payload = PayloadBuilder::new("features", feature("5", "flexbox", &["6"], &["10"]))
///     .with_linked("browsers", browser("1", "Firefox"))
///     .with_tabs(&[("Desktop Browsers", &["1"])])
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    primary_key: String,
    primary: Value,
    linked: BTreeMap<String, Vec<Value>>,
    meta: Map<String, Value>,
    compat_table: Map<String, Value>,
    links: Option<Value>,
}

impl PayloadBuilder {
    /// Start a payload whose primary resource lives under `primary_key`.
    pub fn new(primary_key: impl Into<String>, primary: Value) -> Self {
        Self {
            primary_key: primary_key.into(),
            primary,
            linked: BTreeMap::new(),
            meta: Map::new(),
            compat_table: Map::new(),
            links: None,
        }
    }

    /// Add one representation to the `linked` sidecar.
    pub fn with_linked(mut self, key: &str, representation: Value) -> Self {
        self.linked.entry(key.to_string()).or_default().push(representation);
        self
    }

    /// Add several representations of one type to the `linked` sidecar.
    pub fn with_linked_all(mut self, key: &str, representations: impl IntoIterator<Item = Value>) -> Self {
        self.linked.entry(key.to_string()).or_default().extend(representations);
        self
    }

    /// Set the `compat_table.tabs` block from (english name, browser ids) pairs.
    pub fn with_tabs(mut self, tabs: &[(&str, &[&str])]) -> Self {
        let tabs: Vec<Value> = tabs
            .iter()
            .map(|(name, browsers)| json!({"name": {"en": name}, "browsers": browsers}))
            .collect();
        self.compat_table.insert("tabs".to_string(), Value::Array(tabs));
        self
    }

    /// Record support ids for one feature and browser in `compat_table.supports`.
    pub fn with_supports(mut self, feature_id: &str, browser_id: &str, support_ids: &[&str]) -> Self {
        let supports = self
            .compat_table
            .entry("supports")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(by_feature) = supports.as_object_mut() {
            let by_browser = by_feature
                .entry(feature_id)
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(by_browser) = by_browser.as_object_mut() {
                by_browser.insert(browser_id.to_string(), json!(support_ids));
            }
        }
        self
    }

    /// Mark a feature as present in `compat_table.supports` without any browser data.
    pub fn with_empty_supports(mut self, feature_id: &str) -> Self {
        let supports = self
            .compat_table
            .entry("supports")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(by_feature) = supports.as_object_mut() {
            by_feature.entry(feature_id).or_insert_with(|| Value::Object(Map::new()));
        }
        self
    }

    /// Set `compat_table.notes` from (support id, number) pairs.
    pub fn with_notes(mut self, notes: &[(&str, u32)]) -> Self {
        self.compat_table.insert("notes".to_string(), numbering(notes));
        self
    }

    /// Set `compat_table.footnotes` from (support id, number) pairs.
    pub fn with_footnotes(mut self, footnotes: &[(&str, u32)]) -> Self {
        self.compat_table.insert("footnotes".to_string(), numbering(footnotes));
        self
    }

    /// Set an arbitrary top-level `meta` entry.
    pub fn with_meta(mut self, key: &str, value: Value) -> Self {
        self.meta.insert(key.to_string(), value);
        self
    }

    pub fn with_links(mut self, links: Value) -> Self {
        self.links = Some(links);
        self
    }

    /// Assemble the payload.
    ///
    /// `meta.compat_table` is only emitted when some compat data was added.
    pub fn build(self) -> Value {
        let mut payload = Map::new();
        payload.insert(self.primary_key, self.primary);

        if !self.linked.is_empty() {
            let linked: Map<String, Value> =
                self.linked.into_iter().map(|(k, v)| (k, Value::Array(v))).collect();
            payload.insert("linked".to_string(), Value::Object(linked));
        }

        let mut meta = self.meta;
        if !self.compat_table.is_empty() {
            let mut compat_table = self.compat_table;
            compat_table.entry("tabs").or_insert_with(|| json!([]));
            compat_table.entry("supports").or_insert_with(|| json!({}));
            meta.insert("compat_table".to_string(), Value::Object(compat_table));
        }
        if !meta.is_empty() {
            payload.insert("meta".to_string(), Value::Object(meta));
        }
        if let Some(links) = self.links {
            payload.insert("links".to_string(), links);
        }
        Value::Object(payload)
    }
}

fn numbering(entries: &[(&str, u32)]) -> Value {
    Value::Object(entries.iter().map(|(id, number)| (id.to_string(), json!(number))).collect())
}

/// A feature with an english name and its tree and support links.
pub fn feature(id: &str, name: &str, children: &[&str], supports: &[&str]) -> Value {
    json!({
        "id": id,
        "slug": name.to_lowercase().replace(' ', "-"),
        "name": {"en": name},
        "experimental": false,
        "standardized": true,
        "stable": true,
        "obsolete": false,
        "links": {"parent": null, "children": children, "supports": supports}
    })
}

pub fn browser(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "slug": name.to_lowercase(),
        "name": {"en": name},
        "links": {"versions": []}
    })
}

pub fn version(id: &str, version: &str, browser_id: &str) -> Value {
    json!({
        "id": id,
        "version": version,
        "release_notes_uri": null,
        "links": {"browser": browser_id, "supports": []}
    })
}

/// A support record with no prefix and no notes.
pub fn support(id: &str, status: &str, version_id: &str, feature_id: &str) -> Value {
    json!({
        "id": id,
        "support": status,
        "prefix": null,
        "prefix_mandatory": false,
        "note": null,
        "links": {"version": version_id, "feature": feature_id}
    })
}

/// Merge extra attributes into a representation.
pub fn with_attrs(mut representation: Value, attrs: Value) -> Value {
    if let (Some(target), Some(extra)) = (representation.as_object_mut(), attrs.as_object()) {
        for (key, value) in extra {
            target.insert(key.clone(), value.clone());
        }
    }
    representation
}
