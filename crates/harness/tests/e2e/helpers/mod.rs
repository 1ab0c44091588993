//! Shared E2E test helpers.
//!
//! Provides a fake template engine that materializes a small Python project
//! skeleton, and a builder for test-friendly `ScaffoldConfig` instances.

pub mod engine;
