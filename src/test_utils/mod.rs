//! Test utilities for wpc-browse
//!
//! This module provides payload builders, canned fixtures, and logging setup
//! for unit and integration tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use wpc_browse::graph::ResourceIndex;
//! use wpc_browse::test_utils::PayloadFixture;
//!
//! let index = ResourceIndex::from_payload(&PayloadFixture::feature_view().payload).unwrap();
//! assert_eq!(index.primary().unwrap().id().as_str(), "5");
//! ```

pub mod builder;
pub mod fixtures;

pub use builder::{PayloadBuilder, browser, feature, support, version, with_attrs};
pub use fixtures::PayloadFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. `level` wins over `RUST_LOG`; with
/// neither set, no subscriber is installed.
///
/// ```bash
/// RUST_LOG=wpc_browse=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
