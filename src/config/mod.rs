//! Configuration for wpc-browse
//!
//! A single optional TOML file supplies defaults for the language used to
//! resolve localized strings, the API host, and the HTML id prefix. Every
//! field has a default, so an empty file (or no file at all) is valid.
//!
//! # Location
//!
//! - `--config <path>` on the command line; the file must exist
//! - otherwise `~/.wpc-browse/config.toml`, silently skipped when missing
//!
//! # Format
//!
//! ```toml
//! language = "en"
//!
//! [api]
//! base_url = "https://browsercompat.herokuapp.com"
//! namespace = "api/v1"
//!
//! [render]
//! id_prefix = "wpc-compat"
//! root_label = "Basic support"
//! ```

mod browse;

pub use browse::{
    ApiConfig, BrowseConfig, DEFAULT_API_NAMESPACE, DEFAULT_BASE_URL, DEFAULT_LANGUAGE, RenderConfig,
};
