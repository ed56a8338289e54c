//! Error handling for wpc-browse
//!
//! Two kinds of failure matter when turning a payload into HTML:
//!
//! - **Missing data** ([`BrowseError::MissingData`]): a relationship points at
//!   a resource the payload did not include. This is expected for lazily
//!   fetched relationships, so renderers recover by emitting an "unknown"
//!   marker or a placeholder.
//! - **Malformed input** ([`BrowseError::MalformedInput`] and its specific
//!   siblings): the payload does not have the assumed shape. These abort the
//!   current view.
//!
//! Everything else (I/O, configuration, HTTP, template) is plumbing around
//! those two. [`user_friendly_error`] turns any [`anyhow::Error`] into an
//! [`ErrorContext`] with a suggestion for the CLI.
//!
//! # Examples
//!
//! ```rust,no_run
//! use wpc_browse::core::{BrowseError, ErrorContext};
//!
//! let context = ErrorContext::new(BrowseError::MissingCompatTable)
//!     .with_suggestion("Fetch the feature through the view_features endpoint");
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use super::resource::{ResourceId, ResourceType};

/// The main error type for wpc-browse operations
#[derive(Error, Debug)]
pub enum BrowseError {
    /// A referenced resource is not present in the index.
    #[error("{resource_type} '{id}' is not present in the payload")]
    MissingData {
        resource_type: ResourceType,
        id: ResourceId,
    },

    /// The payload violates the assumed JSON:API shape.
    #[error("Malformed payload: {reason}")]
    MalformedInput {
        reason: String,
    },

    /// A resource representation has no `id`.
    #[error("A {resource_type} representation has no id")]
    MissingId {
        resource_type: ResourceType,
    },

    /// A top-level payload key names no known resource type.
    #[error("Unknown resource type: {name}")]
    UnknownResourceType {
        name: String,
        suggestion: Option<String>,
    },

    /// A relationship value is not an id, null, or a list of ids.
    #[error("Relationship '{name}' of {resource_type} '{id}' is not a valid link")]
    InvalidRelationship {
        resource_type: ResourceType,
        id: ResourceId,
        name: String,
    },

    /// The payload has no `meta.compat_table` block.
    #[error("Payload has no compat_table metadata")]
    MissingCompatTable,

    /// The payload has no primary resource.
    #[error("Payload has no primary resource")]
    NoPrimary,

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config {
        message: String,
    },

    #[error("Failed to render template '{template}': {message}")]
    Render {
        template: String,
        message: String,
    },

    #[error("Request to {url} failed: {message}")]
    Http {
        url: String,
        message: String,
    },
}

impl BrowseError {
    /// Build an [`UnknownResourceType`](BrowseError::UnknownResourceType)
    /// error with the closest known collection key as a suggestion.
    #[must_use]
    pub fn unknown_resource_type(name: &str) -> Self {
        let lowered = name.to_lowercase();
        let suggestion = ResourceType::ALL
            .iter()
            .map(|t| (t.plural(), strsim::levenshtein(&lowered, t.plural())))
            .filter(|(key, distance)| *distance <= key.len() / 2)
            .min_by_key(|(_, distance)| *distance)
            .map(|(key, _)| key.to_string());

        BrowseError::UnknownResourceType {
            name: name.to_string(),
            suggestion,
        }
    }

    /// Whether the renderer may recover from this error with a placeholder.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BrowseError::MissingData { .. })
    }
}

/// Error wrapper with a user-facing suggestion and details.
#[derive(Debug)]
pub struct ErrorContext {
    pub error: BrowseError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: BrowseError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colours.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions.
///
/// Known [`BrowseError`]s anywhere in the chain get tailored advice; other
/// errors keep their message and carry the full chain as details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let chain_details = || {
        error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>().join(": ")
    };

    let Some(browse_error) = error.chain().find_map(|e| e.downcast_ref::<BrowseError>()) else {
        let details = chain_details();
        let context = ErrorContext::new(BrowseError::MalformedInput {
            reason: error.to_string(),
        });
        return if details.is_empty() {
            context
        } else {
            context.with_details(details)
        };
    };

    let rebuilt = clone_error(browse_error);
    let context = ErrorContext::new(rebuilt);
    match browse_error {
        BrowseError::MissingData {
            ..
        } => context
            .with_suggestion("Request the payload with the related resources included")
            .with_details("Relationships that were not fetched render as unknown markers"),
        BrowseError::MalformedInput {
            ..
        }
        | BrowseError::MissingId {
            ..
        }
        | BrowseError::InvalidRelationship {
            ..
        } => context
            .with_suggestion("Check that the payload is a JSON:API response from the compat API")
            .with_details(chain_details()),
        BrowseError::UnknownResourceType {
            suggestion: Some(s),
            ..
        } => context.with_suggestion(format!("Did you mean '{s}'?")),
        BrowseError::UnknownResourceType {
            ..
        } => context.with_suggestion(format!(
            "Known resource types: {}",
            ResourceType::ALL.iter().map(|t| t.plural()).collect::<Vec<_>>().join(", ")
        )),
        BrowseError::MissingCompatTable => context
            .with_suggestion("Fetch the feature through the view_features endpoint")
            .with_details("Only feature view payloads carry meta.compat_table"),
        BrowseError::NoPrimary => context
            .with_suggestion("Use 'list' for collection payloads; tables need a single resource"),
        BrowseError::Json(_) => context.with_suggestion("Check that the input is valid JSON"),
        BrowseError::Io(_) => {
            context.with_suggestion("Check that the file exists and is readable")
        }
        BrowseError::Config {
            ..
        } => context.with_suggestion("Fix or remove the configuration file"),
        BrowseError::Render {
            ..
        } => context,
        BrowseError::Http {
            ..
        } => context.with_suggestion("Check the API base URL and your network connection"),
    }
}

// `BrowseError` wraps non-Clone sources, so rebuild it from its parts.
fn clone_error(error: &BrowseError) -> BrowseError {
    match error {
        BrowseError::MissingData {
            resource_type,
            id,
        } => BrowseError::MissingData {
            resource_type: *resource_type,
            id: id.clone(),
        },
        BrowseError::MalformedInput {
            reason,
        } => BrowseError::MalformedInput {
            reason: reason.clone(),
        },
        BrowseError::MissingId {
            resource_type,
        } => BrowseError::MissingId {
            resource_type: *resource_type,
        },
        BrowseError::UnknownResourceType {
            name,
            suggestion,
        } => BrowseError::UnknownResourceType {
            name: name.clone(),
            suggestion: suggestion.clone(),
        },
        BrowseError::InvalidRelationship {
            resource_type,
            id,
            name,
        } => BrowseError::InvalidRelationship {
            resource_type: *resource_type,
            id: id.clone(),
            name: name.clone(),
        },
        BrowseError::MissingCompatTable => BrowseError::MissingCompatTable,
        BrowseError::NoPrimary => BrowseError::NoPrimary,
        BrowseError::Json(e) => BrowseError::MalformedInput {
            reason: format!("invalid JSON: {e}"),
        },
        BrowseError::Io(e) => BrowseError::Io(std::io::Error::new(e.kind(), e.to_string())),
        BrowseError::Config {
            message,
        } => BrowseError::Config {
            message: message.clone(),
        },
        BrowseError::Render {
            template,
            message,
        } => BrowseError::Render {
            template: template.clone(),
            message: message.clone(),
        },
        BrowseError::Http {
            url,
            message,
        } => BrowseError::Http {
            url: url.clone(),
            message: message.clone(),
        },
    }
}
