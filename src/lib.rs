//! wpc-browse - browse web-compatibility data
//!
//! Reads JSON:API payloads from the web-compatibility API (browsers,
//! versions, features, supports, specifications, and the rest), normalizes
//! them into an in-memory resource graph, and renders the two tables a
//! feature page is built around: the browser compatibility matrix and the
//! specification table.
//!
//! # Architecture Overview
//!
//! ```text
//! payload (file or HTTP) ─▶ graph::ResourceIndex ─▶ render::{compat, specs} ─▶ HTML / text / JSON
//!                                 │
//!                                 └─ meta.compat_table ─▶ graph::CompatMeta
//! ```
//!
//! The API hands out related resources by identifier only. A relationship
//! whose target is absent from the payload is not an error: renderers fall
//! back to an "unknown" marker or a placeholder and log a warning.
//!
//! # Core Modules
//!
//! - [`core`] - Resource model and error types
//! - [`localize`] - Localized string resolution (`lang` → `"en"` → `""`)
//! - [`graph`] - Payload parsing into a [`graph::ResourceIndex`]
//! - [`render`] - Compatibility and specification tables, Tera templates
//!
//! # Supporting Modules
//!
//! - [`display`] - Count texts, dates, translations, and flags for list views
//! - [`pagination`] - Paging blocks and "load more" collection state
//! - [`routes`] - Link templates and URL building
//! - [`api`] - Async HTTP client for the API
//! - [`config`] - Optional TOML configuration
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use wpc_browse::graph::ResourceIndex;
//! use wpc_browse::render::{RenderOptions, render_compat_table};
//!
//! # fn example(json: &str) -> Result<(), wpc_browse::core::BrowseError> {
//! let index = ResourceIndex::parse(json)?;
//! let html = render_compat_table(&index, &RenderOptions::for_language("de"))?;
//! println!("{html}");
//! # Ok(())
//! # }
//! ```

// Resource model and parsing
pub mod core;
pub mod graph;
pub mod localize;

// Output
pub mod display;
pub mod render;

// Fetching and navigation
pub mod api;
pub mod pagination;
pub mod routes;

// Application
pub mod cli;
pub mod config;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
