//! The `meta.compat_table` block of a feature view payload.

use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::core::{BrowseError, ResourceId};
use crate::localize::LocalizedValue;
use crate::pagination::Pagination;

/// Which revision of the note schema a payload uses.
///
/// The first revision numbered `footnotes` and kept a short inline `note`
/// on each support; the later one renamed the long text to `note` and
/// dropped the inline one. The numbering contract is the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteScheme {
    Footnotes,
    Notes,
}

impl NoteScheme {
    /// Support attribute holding the numbered note text.
    #[must_use]
    pub const fn note_attribute(&self) -> &'static str {
        match self {
            NoteScheme::Footnotes => "footnote",
            NoteScheme::Notes => "note",
        }
    }

    /// Support attribute shown inline in the cell, if the revision has one.
    #[must_use]
    pub const fn inline_attribute(&self) -> Option<&'static str> {
        match self {
            NoteScheme::Footnotes => Some("note"),
            NoteScheme::Notes => None,
        }
    }

    /// Word used in note anchor ids.
    #[must_use]
    pub const fn anchor_label(&self) -> &'static str {
        match self {
            NoteScheme::Footnotes => "footnote",
            NoteScheme::Notes => "note",
        }
    }
}

/// One tab of the compatibility panel (e.g. "Desktop Browsers").
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserTab {
    pub name: LocalizedValue,
    pub browsers: Vec<ResourceId>,
}

#[derive(Debug, Deserialize)]
struct RawTab {
    #[serde(default)]
    name: Value,
    #[serde(default)]
    browsers: Vec<ResourceId>,
}

type SupportMap = BTreeMap<ResourceId, BTreeMap<ResourceId, Vec<ResourceId>>>;

#[derive(Debug, Deserialize)]
struct RawCompatTable {
    #[serde(default)]
    tabs: Vec<RawTab>,
    #[serde(default)]
    supports: SupportMap,
    notes: Option<BTreeMap<ResourceId, u32>>,
    footnotes: Option<BTreeMap<ResourceId, u32>>,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    child_pages: bool,
    #[serde(default)]
    pagination: BTreeMap<String, Pagination>,
}

/// Backend-computed layout of a compatibility table, read-only.
#[derive(Debug, Clone)]
pub struct CompatMeta {
    pub tabs: Vec<BrowserTab>,
    pub languages: Vec<String>,
    pub child_pages: bool,
    pub pagination: Option<Pagination>,
    supports: SupportMap,
    notes: BTreeMap<u32, ResourceId>,
    note_numbers: HashMap<ResourceId, u32>,
    note_scheme: NoteScheme,
}

impl CompatMeta {
    /// Parse a `compat_table` block.
    ///
    /// Note numbers are taken from the block's explicit values; they must be
    /// positive and unique.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::MalformedInput`] when the block does not match
    /// the expected shape or the note numbering is invalid.
    pub fn from_value(block: &Value) -> Result<Self, BrowseError> {
        let raw: RawCompatTable =
            serde_json::from_value(block.clone()).map_err(|e| BrowseError::MalformedInput {
                reason: format!("invalid compat_table: {e}"),
            })?;

        let (note_scheme, numbering) = match (raw.notes, raw.footnotes) {
            (Some(notes), _) => (NoteScheme::Notes, notes),
            (None, Some(footnotes)) => (NoteScheme::Footnotes, footnotes),
            (None, None) => (NoteScheme::Notes, BTreeMap::new()),
        };

        let mut notes = BTreeMap::new();
        let mut note_numbers = HashMap::new();
        for (support_id, number) in numbering {
            if number == 0 {
                return Err(BrowseError::MalformedInput {
                    reason: format!("note number for support {support_id} must start at 1"),
                });
            }
            if let Some(existing) = notes.insert(number, support_id.clone()) {
                return Err(BrowseError::MalformedInput {
                    reason: format!(
                        "note number {number} is assigned to both support {existing} and {support_id}"
                    ),
                });
            }
            note_numbers.insert(support_id, number);
        }

        let pagination = raw.pagination.get("linked.features").cloned();

        Ok(Self {
            tabs: raw
                .tabs
                .into_iter()
                .map(|tab| BrowserTab {
                    name: LocalizedValue::from_value(Some(&tab.name)),
                    browsers: tab.browsers,
                })
                .collect(),
            languages: raw.languages,
            child_pages: raw.child_pages,
            pagination,
            supports: raw.supports,
            notes,
            note_numbers,
            note_scheme,
        })
    }

    #[must_use]
    pub fn note_scheme(&self) -> NoteScheme {
        self.note_scheme
    }

    /// Whether the feature appears in the supports map at all.
    #[must_use]
    pub fn has_supports(&self, feature_id: &str) -> bool {
        self.supports.contains_key(feature_id)
    }

    /// Support ids for one feature and browser, in version order.
    #[must_use]
    pub fn supports_for(&self, feature_id: &str, browser_id: &str) -> Option<&[ResourceId]> {
        self.supports.get(feature_id)?.get(browser_id).map(Vec::as_slice)
    }

    /// The note number assigned to a support, if any.
    #[must_use]
    pub fn note_number(&self, support_id: &str) -> Option<u32> {
        self.note_numbers.get(support_id).copied()
    }

    /// Assigned notes in ascending number order.
    pub fn notes(&self) -> impl Iterator<Item = (u32, &ResourceId)> {
        self.notes.iter().map(|(number, id)| (*number, id))
    }
}
