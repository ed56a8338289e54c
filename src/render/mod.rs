//! HTML rendering of resource graphs.
//!
//! Rendering is split into two steps. A renderer walks the
//! [`ResourceIndex`](crate::graph::ResourceIndex) and builds a serializable
//! view model ([`CompatTable`], [`SpecTable`]); [`HtmlRenderer`] then feeds
//! that model to one of the embedded Tera templates. The view models carry
//! every decision (labels, placeholders, note numbers, anchor ids), so the
//! templates only lay out markup.
//!
//! # Templates
//!
//! - `compat_table.html`: tabbed compatibility matrix plus the shared note list
//! - `specification_table.html`: specification/status/comment table
//! - `macros.html`: the `display` macro that turns a
//!   [`DisplayText`](crate::localize::DisplayText) into plain text, `<code>`,
//!   or a placeholder `<em>`
//!
//! Output is escaped with [`escape_html`], which leaves `/` alone so that
//! hrefs stay readable.

pub mod compat;
pub mod specs;

pub use compat::{
    Badge, BadgeKind, BrowserHeader, CURRENT_VERSION, CompatTab, CompatTable,
    CompatibilityTableRenderer, FeatureRow, NoteEntry, NoteRef, SupportCell, SupportEntry,
    UNKNOWN_MARKER, VersionLabel,
};
pub use specs::{SpecRow, SpecTable, SpecificationTableRenderer, UNKNOWN_MATURITY_CLASS};

use serde::Serialize;
use tera::{Context as TeraContext, Tera};

use crate::core::BrowseError;
use crate::graph::ResourceIndex;
use crate::localize::FALLBACK_LANGUAGE;

/// Template for the compatibility matrix.
pub const COMPAT_TEMPLATE: &str = "compat_table.html";
/// Template for the specification table.
pub const SPEC_TEMPLATE: &str = "specification_table.html";

const MACROS_TEMPLATE: &str = "macros.html";

/// Default prefix of element ids in rendered fragments.
pub const DEFAULT_ID_PREFIX: &str = "wpc-compat";
/// Label of the root feature's row.
pub const DEFAULT_ROOT_LABEL: &str = "Basic support";

/// Settings shared by all renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Language tag used to resolve localized strings.
    pub language: String,
    pub id_prefix: String,
    pub root_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            language: FALLBACK_LANGUAGE.to_string(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            root_label: DEFAULT_ROOT_LABEL.to_string(),
        }
    }
}

impl RenderOptions {
    /// Options for `language` with default ids and labels.
    #[must_use]
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }
}

/// Tera engine loaded with the embedded templates.
pub struct HtmlRenderer {
    tera: Tera,
}

impl std::fmt::Debug for HtmlRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlRenderer")
            .field("templates", &self.tera.get_template_names().collect::<Vec<_>>())
            .finish()
    }
}

impl HtmlRenderer {
    /// Load the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::Render`] if a template fails to parse.
    pub fn new() -> Result<Self, BrowseError> {
        let mut tera = Tera::default();
        tera.add_raw_templates([
            (MACROS_TEMPLATE, include_str!("templates/macros.html")),
            (COMPAT_TEMPLATE, include_str!("templates/compat_table.html")),
            (SPEC_TEMPLATE, include_str!("templates/specification_table.html")),
        ])
        .map_err(|e| BrowseError::Render {
            template: "embedded templates".to_string(),
            message: format_tera_error(&e),
        })?;
        tera.set_escape_fn(escape_html);

        Ok(Self {
            tera,
        })
    }

    /// Render any serializable view model with a named template.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::Render`] if the model does not serialize to an
    /// object or the template fails.
    pub fn render<T: Serialize>(&self, template: &str, model: &T) -> Result<String, BrowseError> {
        let context = TeraContext::from_serialize(model).map_err(|e| BrowseError::Render {
            template: template.to_string(),
            message: format_tera_error(&e),
        })?;
        tracing::debug!("Rendering template '{}'", template);
        self.tera.render(template, &context).map_err(|e| BrowseError::Render {
            template: template.to_string(),
            message: format_tera_error(&e),
        })
    }

    /// Render a compatibility matrix.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_compat(&self, table: &CompatTable) -> Result<String, BrowseError> {
        self.render(COMPAT_TEMPLATE, table)
    }

    /// Render a specification table.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_specs(&self, table: &SpecTable) -> Result<String, BrowseError> {
        self.render(SPEC_TEMPLATE, table)
    }
}

/// Build and render the compatibility matrix of a feature view payload.
///
/// # Errors
///
/// Fails when the payload has no feature primary or no `compat_table`
/// block, or when rendering fails.
pub fn render_compat_table(index: &ResourceIndex, options: &RenderOptions) -> Result<String, BrowseError> {
    let meta = index.compat_meta()?;
    let table = CompatibilityTableRenderer::new(index, &meta, options).build()?;
    HtmlRenderer::new()?.render_compat(&table)
}

/// Build and render the specification table of a feature view payload.
///
/// # Errors
///
/// Fails when the payload has no primary resource or rendering fails.
pub fn render_spec_table(index: &ResourceIndex, options: &RenderOptions) -> Result<String, BrowseError> {
    let table = SpecificationTableRenderer::new(index, options).build()?;
    HtmlRenderer::new()?.render_specs(&table)
}

/// Escape text for HTML element content and quoted attributes.
///
/// Unlike Tera's default escaper this keeps `/` as-is.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Flatten a Tera error and its sources into one message.
fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }
    messages.dedup();
    messages.join("\n  → ")
}

#[cfg(test)]
mod specs_tests;
