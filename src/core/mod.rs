//! Core types for wpc-browse
//!
//! This module holds the vocabulary shared by every other module: the
//! resource model fetched from the compatibility API and the error types
//! used to report missing or malformed data.
//!
//! # Modules
//!
//! ## `error` - Error Handling
//! - [`BrowseError`] - Enumerated failure modes (missing data, malformed input, plumbing)
//! - [`ErrorContext`] - User-facing wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any [`anyhow::Error`] for CLI display
//!
//! ## `resource` - Resource Model
//! - [`ResourceType`] - The fixed set of API resource types
//! - [`ResourceId`] - Identifier unique within a type
//! - [`Resource`] - Attributes plus relationships (identifiers only)
//! - [`Relationship`] / [`RelatedIds`] - To-one and to-many links with load state

pub mod error;
pub mod resource;

pub use error::{BrowseError, ErrorContext, user_friendly_error};
pub use resource::{RelatedIds, Relationship, Resource, ResourceId, ResourceType};
