//! Browser compatibility matrix.
//!
//! [`CompatibilityTableRenderer`] flattens the feature tree under a feature
//! view's primary resource into table rows, one tab per
//! [`BrowserTab`](crate::graph::BrowserTab), and collects the numbered
//! notes shared by all tabs.
//!
//! Rows are a pre-order walk of the tree restricted to features that have
//! support data: a feature gets a row when `compat_table.supports` has an
//! entry for it and its own `supports` relationship is non-empty. Children
//! are visited either way.
//!
//! Missing records never abort the table. An unresolvable browser, version,
//! or support is logged and rendered as a placeholder or the unknown marker.

use serde::Serialize;
use std::collections::HashSet;

use crate::core::{BrowseError, Resource, ResourceId, ResourceType};
use crate::graph::{CompatMeta, NoteScheme, ResourceIndex};
use crate::localize::{DisplayText, LocalizedValue, NONE_PLACEHOLDER};

use super::RenderOptions;

/// Version string meaning "the current release".
pub const CURRENT_VERSION: &str = "current";

/// Text shown in place of a cell without support data.
pub const UNKNOWN_MARKER: &str = "?";

const NOT_SUPPORTED: &str = "Not supported";

/// Indicator shown next to a feature name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Experimental,
    NonStandard,
    Obsolete,
}

/// An icon with its accessible text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub kind: BadgeKind,
    pub icon: &'static str,
    pub text: &'static str,
}

impl Badge {
    #[must_use]
    pub const fn new(kind: BadgeKind) -> Self {
        match kind {
            BadgeKind::Experimental => Self {
                kind,
                icon: "icon-warning",
                text: "This is an experimental API that should not be used in production code.",
            },
            BadgeKind::NonStandard => Self {
                kind,
                icon: "icon-warning",
                text: "This API has not been standardized.",
            },
            BadgeKind::Obsolete => Self {
                kind,
                icon: "icon-thumbs-down",
                text: "This deprecated API should no longer be used, but will probably still work.",
            },
        }
    }

    /// Badges for a feature's boolean flags.
    #[must_use]
    pub fn for_feature(feature: &Resource) -> Vec<Self> {
        let mut badges = Vec::new();
        if feature.attr_bool("experimental") == Some(true) {
            badges.push(Self::new(BadgeKind::Experimental));
        }
        if feature.attr_bool("standardized") == Some(false) {
            badges.push(Self::new(BadgeKind::NonStandard));
        }
        if feature.attr_bool("obsolete") == Some(true) {
            badges.push(Self::new(BadgeKind::Obsolete));
        }
        badges
    }
}

/// A version label, linked to release notes when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionLabel {
    pub text: String,
    pub href: Option<String>,
}

/// Link from a support entry to its numbered note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRef {
    pub number: u32,
    pub anchor: String,
    pub back_anchor: String,
}

/// One support record as shown in a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportEntry {
    pub support_id: ResourceId,
    pub version: Option<VersionLabel>,
    pub not_supported: bool,
    pub status: Option<String>,
    pub prefix: Option<String>,
    pub inline_note: Option<String>,
    pub note: Option<NoteRef>,
}

impl SupportEntry {
    /// Cell text without markup, e.g. `4.0Not supported` or `(yes) -webkit-`.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::new();
        if let Some(version) = &self.version {
            text.push_str(&version.text);
        }
        if self.not_supported {
            text.push_str(NOT_SUPPORTED);
        }
        if let Some(status) = &self.status {
            push_separated(&mut text, &format!("({status})"));
        }
        if let Some(prefix) = &self.prefix {
            push_separated(&mut text, prefix);
        }
        if let Some(inline_note) = &self.inline_note {
            push_separated(&mut text, &format!("({inline_note})"));
        }
        if let Some(note) = &self.note {
            push_separated(&mut text, &format!("[{}]", note.number));
        }
        text
    }
}

fn push_separated(text: &mut String, part: &str) {
    if !text.is_empty() {
        text.push(' ');
    }
    text.push_str(part);
}

/// Contents of one browser column for one feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "entries", rename_all = "lowercase")]
pub enum SupportCell {
    Unknown,
    Known(Vec<SupportEntry>),
}

impl SupportCell {
    /// Entries joined by line breaks, or the unknown marker.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            SupportCell::Unknown => UNKNOWN_MARKER.to_string(),
            SupportCell::Known(entries) => {
                entries.iter().map(SupportEntry::text).collect::<Vec<_>>().join("\n")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserHeader {
    pub id: ResourceId,
    pub name: DisplayText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRow {
    pub feature_id: ResourceId,
    pub label: DisplayText,
    pub badges: Vec<Badge>,
    pub cells: Vec<SupportCell>,
}

impl FeatureRow {
    /// Label followed by badge texts.
    #[must_use]
    pub fn label_text(&self) -> String {
        let mut text = self.label.text().to_string();
        for badge in &self.badges {
            push_separated(&mut text, badge.text);
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatTab {
    /// Element id, `{prefix}-{feature id}_{tab index}`.
    pub id: String,
    pub name: DisplayText,
    pub browsers: Vec<BrowserHeader>,
    pub rows: Vec<FeatureRow>,
}

/// One paragraph of the shared note list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEntry {
    pub number: u32,
    pub anchor: String,
    pub back_anchor: String,
    pub text: DisplayText,
}

/// Everything the compatibility template needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatTable {
    pub id: String,
    pub feature_id: ResourceId,
    pub tabs: Vec<CompatTab>,
    pub notes: Vec<NoteEntry>,
}

impl CompatTable {
    #[must_use]
    pub fn tab(&self, name: &str) -> Option<&CompatTab> {
        self.tabs.iter().find(|tab| tab.name.text() == name)
    }
}

/// Builds a [`CompatTable`] from a feature view payload.
pub struct CompatibilityTableRenderer<'a> {
    index: &'a ResourceIndex,
    meta: &'a CompatMeta,
    options: &'a RenderOptions,
}

impl<'a> CompatibilityTableRenderer<'a> {
    #[must_use]
    pub fn new(index: &'a ResourceIndex, meta: &'a CompatMeta, options: &'a RenderOptions) -> Self {
        Self {
            index,
            meta,
            options,
        }
    }

    fn lang(&self) -> &str {
        &self.options.language
    }

    /// Build the table for the index's primary feature.
    ///
    /// # Errors
    ///
    /// - [`BrowseError::NoPrimary`] for collection payloads
    /// - [`BrowseError::MalformedInput`] when the primary is not a feature
    pub fn build(&self) -> Result<CompatTable, BrowseError> {
        let root = self.index.primary()?;
        if root.resource_type() != ResourceType::Feature {
            return Err(BrowseError::MalformedInput {
                reason: format!(
                    "compatibility tables need a feature, got {} {}",
                    root.resource_type(),
                    root.id()
                ),
            });
        }

        let features = self.feature_rows(root);
        tracing::debug!(
            "Feature {} has {} rows with support data across {} tabs",
            root.id(),
            features.len(),
            self.meta.tabs.len()
        );

        let tabs = self
            .meta
            .tabs
            .iter()
            .enumerate()
            .map(|(tab_index, tab)| CompatTab {
                id: format!("{}-{}_{}", self.options.id_prefix, root.id(), tab_index),
                name: tab.name.display(self.lang(), NONE_PLACEHOLDER),
                browsers: tab.browsers.iter().map(|id| self.browser_header(id)).collect(),
                rows: features
                    .iter()
                    .map(|feature| self.row(feature, root.id(), &tab.browsers))
                    .collect(),
            })
            .collect();

        Ok(CompatTable {
            id: format!("{}-{}", self.options.id_prefix, root.id()),
            feature_id: root.id().clone(),
            tabs,
            notes: self.note_list(root.id()),
        })
    }

    /// Features that get a row, in pre-order.
    fn feature_rows(&self, root: &'a Resource) -> Vec<&'a Resource> {
        let mut rows = Vec::new();
        let mut visited = HashSet::new();
        self.visit(root, &mut visited, &mut rows);
        rows
    }

    fn visit(
        &self,
        feature: &'a Resource,
        visited: &mut HashSet<&'a ResourceId>,
        rows: &mut Vec<&'a Resource>,
    ) {
        if !visited.insert(feature.id()) {
            tracing::warn!("Feature {} appears twice in the feature tree; skipping", feature.id());
            return;
        }

        if self.meta.has_supports(feature.id().as_str()) && feature.relationship_count("supports") > 0 {
            rows.push(feature);
        }

        for child_id in feature.related_ids("children") {
            match self.index.get(ResourceType::Feature, child_id.as_str()) {
                Some(child) => self.visit(child, visited, rows),
                None => tracing::warn!(
                    "Child feature {} of feature {} is not in the payload",
                    child_id,
                    feature.id()
                ),
            }
        }
    }

    fn browser_header(&self, browser_id: &ResourceId) -> BrowserHeader {
        let name = match self.index.get(ResourceType::Browser, browser_id.as_str()) {
            Some(browser) => {
                LocalizedValue::from_value(browser.attr("name")).display(self.lang(), NONE_PLACEHOLDER)
            }
            None => {
                tracing::warn!("Browser {} is not in the payload", browser_id);
                DisplayText::Placeholder(format!("browser {browser_id}"))
            }
        };
        BrowserHeader {
            id: browser_id.clone(),
            name,
        }
    }

    fn row(&self, feature: &Resource, root_id: &ResourceId, browsers: &[ResourceId]) -> FeatureRow {
        let label = if feature.id() == root_id {
            DisplayText::Text(self.options.root_label.clone())
        } else {
            LocalizedValue::from_value(feature.attr("name")).display(self.lang(), NONE_PLACEHOLDER)
        };

        FeatureRow {
            feature_id: feature.id().clone(),
            label,
            badges: Badge::for_feature(feature),
            cells: browsers
                .iter()
                .map(|browser_id| self.cell(feature.id(), browser_id, root_id))
                .collect(),
        }
    }

    fn cell(&self, feature_id: &ResourceId, browser_id: &ResourceId, root_id: &ResourceId) -> SupportCell {
        let Some(support_ids) = self.meta.supports_for(feature_id.as_str(), browser_id.as_str()) else {
            return SupportCell::Unknown;
        };

        let entries: Vec<SupportEntry> = support_ids
            .iter()
            .filter_map(|support_id| {
                let support = self.index.get(ResourceType::Support, support_id.as_str());
                if support.is_none() {
                    tracing::warn!(
                        "Support {} for feature {} in browser {} is not in the payload",
                        support_id,
                        feature_id,
                        browser_id
                    );
                }
                support.map(|support| self.entry(support, root_id))
            })
            .collect();

        if entries.is_empty() {
            SupportCell::Unknown
        } else {
            SupportCell::Known(entries)
        }
    }

    fn entry(&self, support: &Resource, root_id: &ResourceId) -> SupportEntry {
        let version = match self.index.related(support, "version") {
            Ok(version) => Some(version),
            Err(e) => {
                tracing::warn!("Support {}: {}", support.id(), e);
                None
            }
        };

        let version_string = version.and_then(|v| v.attr_str("version")).unwrap_or_default();
        let is_current = version_string.is_empty() || version_string == CURRENT_VERSION;
        let version_label = match version {
            Some(version) if !is_current => {
                let href = LocalizedValue::from_value(version.attr("release_notes_uri")).plain(self.lang());
                Some(VersionLabel {
                    text: version_string.to_string(),
                    href: (!href.is_empty()).then_some(href),
                })
            }
            _ => None,
        };

        let status = support.attr_str("support").unwrap_or("unknown");
        let not_supported = status == "no";
        let status = (!not_supported && (status != "yes" || is_current)).then(|| status.to_string());

        let prefix = support
            .attr_str("prefix")
            .filter(|prefix| !prefix.is_empty() && support.attr_bool("prefix_mandatory") == Some(true))
            .map(str::to_string);

        let scheme = self.meta.note_scheme();
        let inline_note = scheme.inline_attribute().and_then(|name| {
            let note = LocalizedValue::from_value(support.attr(name));
            note.is_present().then(|| note.plain(self.lang()))
        });

        SupportEntry {
            support_id: support.id().clone(),
            version: version_label,
            not_supported,
            status,
            prefix,
            inline_note,
            note: self.note_ref(support, scheme, root_id),
        }
    }

    fn note_ref(&self, support: &Resource, scheme: NoteScheme, root_id: &ResourceId) -> Option<NoteRef> {
        if !LocalizedValue::from_value(support.attr(scheme.note_attribute())).is_present() {
            return None;
        }
        let Some(number) = self.meta.note_number(support.id().as_str()) else {
            tracing::warn!("Support {} has a {} but no note number", support.id(), scheme.note_attribute());
            return None;
        };
        let anchor = self.note_anchor(root_id, number);
        Some(NoteRef {
            number,
            back_anchor: format!("{anchor}-back"),
            anchor,
        })
    }

    fn note_anchor(&self, root_id: &ResourceId, number: u32) -> String {
        format!(
            "{}-{}-{}-{}",
            self.options.id_prefix,
            root_id,
            self.meta.note_scheme().anchor_label(),
            number
        )
    }

    fn note_list(&self, root_id: &ResourceId) -> Vec<NoteEntry> {
        let attribute = self.meta.note_scheme().note_attribute();
        self.meta
            .notes()
            .map(|(number, support_id)| {
                let text = match self.index.get(ResourceType::Support, support_id.as_str()) {
                    Some(support) => LocalizedValue::from_value(support.attr(attribute))
                        .display(self.lang(), NONE_PLACEHOLDER),
                    None => {
                        tracing::warn!("Note {} belongs to support {} which is not in the payload", number, support_id);
                        DisplayText::Placeholder(NONE_PLACEHOLDER.to_string())
                    }
                };
                let anchor = self.note_anchor(root_id, number);
                NoteEntry {
                    number,
                    back_anchor: format!("{anchor}-back"),
                    anchor,
                    text,
                }
            })
            .collect()
    }
}
