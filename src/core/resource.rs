//! Resource model for JSON:API payloads.
//!
//! Every record fetched from the compatibility API is a [`Resource`]: a typed,
//! identified bag of attributes plus named relationships. Relationships only
//! ever hold identifiers; the related records are looked up on demand in the
//! shared [`ResourceIndex`](crate::graph::ResourceIndex), so the graph never
//! contains owning back-references.
//!
//! # Resource Types
//!
//! | Type | Collection key | Example relationships |
//! |------|----------------|-----------------------|
//! | browser | `browsers` | `versions` |
//! | version | `versions` | `browser`, `supports` |
//! | feature | `features` | `parent`, `children`, `supports`, `references` |
//! | support | `supports` | `version`, `feature` |
//! | specification | `specifications` | `maturity`, `sections` |
//! | section | `sections` | `specification`, `references` |
//! | reference | `references` | `feature`, `section` |
//! | maturity | `maturities` | `specifications` |
//! | user | `users` | `changesets` |
//! | changeset | `changesets` | `user` |

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use super::error::BrowseError;

/// The fixed set of resource types served by the compatibility API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Browser,
    Version,
    Feature,
    Support,
    Specification,
    Section,
    Reference,
    Maturity,
    User,
    Changeset,
}

impl ResourceType {
    /// All resource types, in declaration order.
    pub const ALL: [ResourceType; 10] = [
        ResourceType::Browser,
        ResourceType::Version,
        ResourceType::Feature,
        ResourceType::Support,
        ResourceType::Specification,
        ResourceType::Section,
        ResourceType::Reference,
        ResourceType::Maturity,
        ResourceType::User,
        ResourceType::Changeset,
    ];

    /// Singular name, as used in routes and log messages.
    #[must_use]
    pub const fn singular(&self) -> &'static str {
        match self {
            ResourceType::Browser => "browser",
            ResourceType::Version => "version",
            ResourceType::Feature => "feature",
            ResourceType::Support => "support",
            ResourceType::Specification => "specification",
            ResourceType::Section => "section",
            ResourceType::Reference => "reference",
            ResourceType::Maturity => "maturity",
            ResourceType::User => "user",
            ResourceType::Changeset => "changeset",
        }
    }

    /// Plural collection key, as it appears at the top level of a payload
    /// and inside the `linked` sidecar.
    #[must_use]
    pub const fn plural(&self) -> &'static str {
        match self {
            ResourceType::Browser => "browsers",
            ResourceType::Version => "versions",
            ResourceType::Feature => "features",
            ResourceType::Support => "supports",
            ResourceType::Specification => "specifications",
            ResourceType::Section => "sections",
            ResourceType::Reference => "references",
            ResourceType::Maturity => "maturities",
            ResourceType::User => "users",
            ResourceType::Changeset => "changesets",
        }
    }

    /// Look up a type by its collection key (`"features"`) or singular name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.plural() == key || t.singular() == key)
    }

    /// The resource type a relationship name points at.
    ///
    /// Relationship names are either the singular/plural name of the target
    /// type or one of the feature tree names (`parent`, `children`).
    /// History relationships and anything unknown return `None`; those
    /// relationships are kept on the resource but never resolved.
    #[must_use]
    pub fn relationship_target(name: &str) -> Option<Self> {
        match name {
            "parent" | "children" => Some(ResourceType::Feature),
            other => Self::from_key(other),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = BrowseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::from_key(&lowered).ok_or_else(|| BrowseError::unknown_resource_type(s))
    }
}

/// Identifier of a resource, unique within its type.
///
/// The API emits identifiers as strings, but older payloads use bare
/// numbers; both deserialize to the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read an identifier from a JSON value (string or integer).
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) if n.is_u64() || n.is_i64() => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| {
            serde::de::Error::custom(format!("expected string or integer id, found {value}"))
        })
    }
}

/// Identifiers of a to-many relationship.
///
/// `loaded` records whether every identifier was present in the index the
/// resource was parsed into. Counting never needs the related records, so
/// list views read [`RelatedIds::count`] regardless of `loaded`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelatedIds {
    pub ids: Vec<ResourceId>,
    pub loaded: bool,
}

impl RelatedIds {
    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }
}

/// A named relationship on a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relationship {
    ToOne(Option<ResourceId>),
    ToMany(RelatedIds),
}

impl Relationship {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Relationship::ToOne(None)),
            Value::Array(items) => {
                let ids = items.iter().map(ResourceId::from_value).collect::<Option<Vec<_>>>()?;
                Some(Relationship::ToMany(RelatedIds {
                    ids,
                    loaded: false,
                }))
            }
            other => ResourceId::from_value(other).map(|id| Relationship::ToOne(Some(id))),
        }
    }

    /// Number of related identifiers (0 or 1 for a to-one link).
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Relationship::ToOne(id) => usize::from(id.is_some()),
            Relationship::ToMany(related) => related.count(),
        }
    }

    /// Related identifiers in relationship order.
    #[must_use]
    pub fn ids(&self) -> Vec<&ResourceId> {
        match self {
            Relationship::ToOne(id) => id.iter().collect(),
            Relationship::ToMany(related) => related.ids.iter().collect(),
        }
    }
}

/// A typed, identified record from a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    resource_type: ResourceType,
    id: ResourceId,
    attributes: Map<String, Value>,
    relationships: BTreeMap<String, Relationship>,
    representation: Value,
}

impl Resource {
    /// Build a resource from its JSON representation.
    ///
    /// The representation must be an object carrying an `id`. Relationships
    /// live under the representation's `links` object; every other key is an
    /// attribute.
    ///
    /// # Errors
    ///
    /// - [`BrowseError::MalformedInput`] if the representation is not an object
    /// - [`BrowseError::MissingId`] if it has no usable `id`
    /// - [`BrowseError::InvalidRelationship`] if a link value is not an id,
    ///   `null`, or an array of ids
    pub fn from_representation(
        resource_type: ResourceType,
        representation: &Value,
    ) -> Result<Self, BrowseError> {
        let object = representation.as_object().ok_or_else(|| BrowseError::MalformedInput {
            reason: format!("{} representation is not an object", resource_type),
        })?;

        let id = object.get("id").and_then(ResourceId::from_value).ok_or(BrowseError::MissingId {
            resource_type,
        })?;

        let mut attributes = Map::new();
        let mut relationships = BTreeMap::new();
        for (key, value) in object {
            match key.as_str() {
                "id" => {}
                "links" => {
                    let links = value.as_object().ok_or_else(|| BrowseError::MalformedInput {
                        reason: format!("links of {} {} is not an object", resource_type, id),
                    })?;
                    for (name, link) in links {
                        let relationship = Relationship::from_value(link).ok_or_else(|| {
                            BrowseError::InvalidRelationship {
                                resource_type,
                                id: id.clone(),
                                name: name.clone(),
                            }
                        })?;
                        relationships.insert(name.clone(), relationship);
                    }
                }
                _ => {
                    attributes.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(Self {
            resource_type,
            id,
            attributes,
            relationships,
            representation: representation.clone(),
        })
    }

    #[must_use]
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    #[must_use]
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// The representation exactly as it appeared in the payload.
    #[must_use]
    pub fn representation(&self) -> &Value {
        &self.representation
    }

    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Raw attribute value; `None` when absent.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// String attribute; `None` when absent, null, or not a string.
    #[must_use]
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(Value::as_str)
    }

    /// Boolean attribute; `None` when absent, null, or not a boolean.
    #[must_use]
    pub fn attr_bool(&self, name: &str) -> Option<bool> {
        self.attr(name).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn relationships(&self) -> &BTreeMap<String, Relationship> {
        &self.relationships
    }

    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.get(name)
    }

    /// Identifier of a to-one relationship, if set.
    #[must_use]
    pub fn related_id(&self, name: &str) -> Option<&ResourceId> {
        match self.relationships.get(name)? {
            Relationship::ToOne(id) => id.as_ref(),
            Relationship::ToMany(_) => None,
        }
    }

    /// Identifiers of a relationship in order; empty when absent.
    #[must_use]
    pub fn related_ids(&self, name: &str) -> Vec<&ResourceId> {
        self.relationships.get(name).map(Relationship::ids).unwrap_or_default()
    }

    /// Count of related identifiers without touching the related records.
    #[must_use]
    pub fn relationship_count(&self, name: &str) -> usize {
        self.relationships.get(name).map_or(0, Relationship::count)
    }

    pub(crate) fn relationships_mut(&mut self) -> impl Iterator<Item = (&String, &mut Relationship)> {
        self.relationships.iter_mut()
    }
}
