//! Pagination of collection views.
//!
//! List payloads carry their paging state in
//! `meta.pagination.<collection key>`:
//!
//! ```json
//! {"meta": {"pagination": {"browsers": {"previous": null, "next": "...?page=2", "count": 42}}}}
//! ```
//!
//! [`CollectionView`] holds the items shown so far and decides whether
//! another page can be requested. Page requests are not coordinated: a
//! response applied later simply overwrites the pagination set by an earlier
//! one, and nothing is de-duplicated or cancelled.

use serde::{Deserialize, Serialize};

use crate::core::{BrowseError, ResourceId, ResourceType};
use crate::graph::ResourceIndex;

/// Paging links and total count for one collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub count: u64,
}

impl Pagination {
    /// Read the pagination block for `resource_type` from an index's meta.
    #[must_use]
    pub fn from_index(index: &ResourceIndex, resource_type: ResourceType) -> Option<Self> {
        let block = index.meta()?.get("pagination")?.get(resource_type.plural())?;
        match serde_json::from_value(block.clone()) {
            Ok(pagination) => Some(pagination),
            Err(e) => {
                tracing::warn!("Ignoring malformed pagination for {}: {}", resource_type.plural(), e);
                None
            }
        }
    }
}

/// State of a paginated list view with "load more" support.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionView {
    resource_type: ResourceType,
    items: Vec<ResourceId>,
    current_page: u32,
    loading_more: bool,
    pagination: Option<Pagination>,
}

impl CollectionView {
    /// Start a view from the first page of a list payload.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::MalformedInput`] if the payload is not a list.
    pub fn from_index(index: &ResourceIndex) -> Result<Self, BrowseError> {
        let (resource_type, ids) = index.collection().ok_or_else(|| BrowseError::MalformedInput {
            reason: "payload is not a collection".to_string(),
        })?;
        Ok(Self {
            resource_type,
            items: ids.to_vec(),
            current_page: 1,
            loading_more: false,
            pagination: Pagination::from_index(index, resource_type),
        })
    }

    #[must_use]
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    #[must_use]
    pub fn items(&self) -> &[ResourceId] {
        &self.items
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    #[must_use]
    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Whether the server reports a next page and more items than are shown.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.pagination
            .as_ref()
            .is_some_and(|p| p.next.is_some() && p.count > self.items.len() as u64)
    }

    /// Advance to the next page and mark the view as loading.
    ///
    /// Returns the page number to request, or `None` when there is nothing
    /// more to load.
    pub fn begin_load_more(&mut self) -> Option<u32> {
        if !self.can_load_more() {
            return None;
        }
        self.current_page += 1;
        self.loading_more = true;
        Some(self.current_page)
    }

    /// Append a fetched page and take over its pagination block.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::MalformedInput`] if the page is not a list of
    /// the same resource type.
    pub fn apply_page(&mut self, page: &ResourceIndex) -> Result<(), BrowseError> {
        let (resource_type, ids) = page.collection().ok_or_else(|| BrowseError::MalformedInput {
            reason: "page payload is not a collection".to_string(),
        })?;
        if resource_type != self.resource_type {
            return Err(BrowseError::MalformedInput {
                reason: format!(
                    "page contains {} but the view lists {}",
                    resource_type.plural(),
                    self.resource_type.plural()
                ),
            });
        }

        self.items.extend_from_slice(ids);
        self.pagination = Pagination::from_index(page, resource_type);
        self.loading_more = false;
        tracing::debug!(
            "Applied page {} of {}: {} items shown",
            self.current_page,
            self.resource_type.plural(),
            self.items.len()
        );
        Ok(())
    }

    /// Go back to the first page.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}
