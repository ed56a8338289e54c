//! Resource graph parsing.
//!
//! A JSON:API (RC1) payload from the compatibility API looks like:
//!
//! ```json
//! {
//!   "features": {"id": "5", "name": {"en": "flex"}, "links": {"children": ["6"]}},
//!   "linked": {"features": [{"id": "6", "links": {"children": []}}]},
//!   "links": {"features.children": {"type": "features", "href": "..."}},
//!   "meta": {"compat_table": {"tabs": [], "supports": {}, "notes": {}}}
//! }
//! ```
//!
//! [`ResourceIndex::from_payload`] flattens that into a type → id → resource
//! map, remembers the top-level subject as the primary resource, and keeps
//! `meta` and `links` verbatim. Relationships hold identifiers only; callers
//! resolve them through the index each time they need a related record.

mod compat_meta;

pub use compat_meta::{BrowserTab, CompatMeta, NoteScheme};

use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use crate::core::{BrowseError, Relationship, Resource, ResourceId, ResourceType};

/// How a primary resource links to specification sections.
///
/// Early payloads list `sections` on the feature directly; later ones go
/// through intermediate `references` that each point at one section and
/// carry the comment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecLinkage {
    Sections,
    References,
}

/// Normalized view of one fetched payload.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    resources: BTreeMap<ResourceType, BTreeMap<ResourceId, Resource>>,
    primary: Option<(ResourceType, ResourceId)>,
    collection: Option<(ResourceType, Vec<ResourceId>)>,
    spec_linkage: Option<SpecLinkage>,
    meta: Option<Value>,
    links: Option<Value>,
}

impl ResourceIndex {
    /// Parse a payload from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::Json`] for invalid JSON and the errors of
    /// [`from_payload`](Self::from_payload) otherwise.
    pub fn parse(json: &str) -> Result<Self, BrowseError> {
        let payload: Value = serde_json::from_str(json)?;
        Self::from_payload(&payload)
    }

    /// Build an index from a decoded payload.
    ///
    /// - `linked` maps collection keys to arrays of representations
    /// - `meta` and `links` are copied as-is
    /// - any other key is a collection key whose value is the primary
    ///   representation (the last such key wins), or an array of
    ///   representations for list payloads
    ///
    /// Sidecar collections of types this crate does not model (history
    /// records, for instance) are skipped.
    ///
    /// # Errors
    ///
    /// - [`BrowseError::MalformedInput`] if the payload or `linked` has the wrong shape
    /// - [`BrowseError::UnknownResourceType`] for an unknown top-level key
    /// - [`BrowseError::MissingId`] if any representation lacks an id
    pub fn from_payload(payload: &Value) -> Result<Self, BrowseError> {
        let object = payload.as_object().ok_or_else(|| BrowseError::MalformedInput {
            reason: "payload is not a JSON object".to_string(),
        })?;

        let mut index = ResourceIndex::default();
        for (key, value) in object {
            match key.as_str() {
                "linked" => index.insert_linked(value)?,
                "meta" => index.meta = Some(value.clone()),
                "links" => index.links = Some(value.clone()),
                _ => {
                    let resource_type = ResourceType::from_key(key)
                        .ok_or_else(|| BrowseError::unknown_resource_type(key))?;
                    index.insert_primary(resource_type, value)?;
                }
            }
        }

        index.mark_loaded_relationships();
        index.spec_linkage = index.primary().ok().and_then(|primary| {
            if primary.relationship("references").is_some() {
                Some(SpecLinkage::References)
            } else if primary.relationship("sections").is_some() {
                Some(SpecLinkage::Sections)
            } else {
                None
            }
        });

        tracing::debug!(
            "Parsed payload: {} resources, primary={:?}, collection={}",
            index.len(),
            index.primary.as_ref().map(|(t, id)| format!("{t} {id}")),
            index.collection.as_ref().map_or(0, |(_, ids)| ids.len())
        );
        Ok(index)
    }

    fn insert_linked(&mut self, linked: &Value) -> Result<(), BrowseError> {
        let linked = linked.as_object().ok_or_else(|| BrowseError::MalformedInput {
            reason: "'linked' is not an object".to_string(),
        })?;

        for (key, representations) in linked {
            let Some(resource_type) = ResourceType::from_key(key) else {
                tracing::debug!("Skipping linked collection '{}'", key);
                continue;
            };
            let items = representations.as_array().ok_or_else(|| BrowseError::MalformedInput {
                reason: format!("linked '{key}' is not an array"),
            })?;
            for item in items {
                self.insert(Resource::from_representation(resource_type, item)?);
            }
        }
        Ok(())
    }

    fn insert_primary(&mut self, resource_type: ResourceType, value: &Value) -> Result<(), BrowseError> {
        if let Some(items) = value.as_array() {
            let mut ids = Vec::with_capacity(items.len());
            for item in items {
                let resource = Resource::from_representation(resource_type, item)?;
                ids.push(resource.id().clone());
                self.insert(resource);
            }
            self.collection = Some((resource_type, ids));
            return Ok(());
        }

        let resource = Resource::from_representation(resource_type, value)?;
        if let Some((previous_type, previous_id)) = &self.primary {
            tracing::warn!(
                "Payload has more than one primary resource; {} {} replaces {} {}",
                resource_type,
                resource.id(),
                previous_type,
                previous_id
            );
        }
        self.primary = Some((resource_type, resource.id().clone()));
        self.insert(resource);
        Ok(())
    }

    /// Insert (or replace) a resource under its own type and id.
    pub fn insert(&mut self, resource: Resource) {
        self.resources
            .entry(resource.resource_type())
            .or_default()
            .insert(resource.id().clone(), resource);
    }

    fn mark_loaded_relationships(&mut self) {
        let present: HashSet<(ResourceType, ResourceId)> = self
            .resources
            .iter()
            .flat_map(|(t, by_id)| by_id.keys().map(move |id| (*t, id.clone())))
            .collect();

        for resource in self.resources.values_mut().flat_map(BTreeMap::values_mut) {
            for (name, relationship) in resource.relationships_mut() {
                if let Relationship::ToMany(related) = relationship {
                    let loaded = ResourceType::relationship_target(name).is_some_and(|target| {
                        related.ids.iter().all(|id| present.contains(&(target, id.clone())))
                    });
                    related.loaded = loaded;
                }
            }
        }
    }

    /// The top-level subject of the payload.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::NoPrimary`] for collection payloads.
    pub fn primary(&self) -> Result<&Resource, BrowseError> {
        let (resource_type, id) = self.primary.as_ref().ok_or(BrowseError::NoPrimary)?;
        self.require(*resource_type, id.as_str())
    }

    /// Type and ordered ids of a list payload's top-level collection.
    #[must_use]
    pub fn collection(&self) -> Option<(ResourceType, &[ResourceId])> {
        self.collection.as_ref().map(|(t, ids)| (*t, ids.as_slice()))
    }

    /// Specification linkage of the primary resource, resolved at parse time.
    #[must_use]
    pub fn spec_linkage(&self) -> Option<SpecLinkage> {
        self.spec_linkage
    }

    #[must_use]
    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    #[must_use]
    pub fn links(&self) -> Option<&Value> {
        self.links.as_ref()
    }

    #[must_use]
    pub fn get(&self, resource_type: ResourceType, id: &str) -> Option<&Resource> {
        self.resources.get(&resource_type)?.get(id)
    }

    /// Look up a resource that must be present.
    ///
    /// # Errors
    ///
    /// Returns the recoverable [`BrowseError::MissingData`] when absent.
    pub fn require(&self, resource_type: ResourceType, id: &str) -> Result<&Resource, BrowseError> {
        self.get(resource_type, id).ok_or_else(|| BrowseError::MissingData {
            resource_type,
            id: ResourceId::from(id),
        })
    }

    /// Follow a to-one relationship of `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::MissingData`] when the link is unset, unknown,
    /// or points at a resource the payload did not include.
    pub fn related(&self, resource: &Resource, name: &str) -> Result<&Resource, BrowseError> {
        let target = ResourceType::relationship_target(name).ok_or_else(|| BrowseError::MalformedInput {
            reason: format!("relationship '{name}' does not name a resource type"),
        })?;
        let id = resource.related_id(name).ok_or_else(|| BrowseError::MissingData {
            resource_type: target,
            id: ResourceId::from(format!("{}.{}", resource.id(), name)),
        })?;
        self.require(target, id.as_str())
    }

    /// Resources of one type, ordered by id.
    pub fn resources_of(&self, resource_type: ResourceType) -> impl Iterator<Item = &Resource> {
        self.resources.get(&resource_type).into_iter().flat_map(BTreeMap::values)
    }

    /// Number of resources of one type.
    #[must_use]
    pub fn count(&self, resource_type: ResourceType) -> usize {
        self.resources.get(&resource_type).map_or(0, BTreeMap::len)
    }

    /// Total number of resources in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Types with at least one resource, in declaration order.
    #[must_use]
    pub fn resource_types(&self) -> Vec<ResourceType> {
        self.resources.iter().filter(|(_, by_id)| !by_id.is_empty()).map(|(t, _)| *t).collect()
    }

    /// The `meta.compat_table` block, parsed.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::MissingCompatTable`] when the payload has no
    /// such block, and [`BrowseError::MalformedInput`] when it is malformed.
    pub fn compat_meta(&self) -> Result<CompatMeta, BrowseError> {
        let block = self
            .meta
            .as_ref()
            .and_then(|meta| meta.get("compat_table"))
            .ok_or(BrowseError::MissingCompatTable)?;
        CompatMeta::from_value(block)
    }
}
