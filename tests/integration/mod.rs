//! Integration test suite for wpc-browse
//!
//! End-to-end tests that drive the `wpc-browse` binary against payload files
//! and a local mock API server.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **compat**: Compatibility table output in every format
//! - **specs**: Specification table output
//! - **inspect**: Payload summaries
//! - **list**: Collection listing and `--all` paging against the mock API
//! - **config**: Configuration file discovery and overrides
//! - **errors**: Exit codes and user-facing error messages

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod compat;
mod config;
mod errors;
mod inspect;
mod list;
mod specs;
