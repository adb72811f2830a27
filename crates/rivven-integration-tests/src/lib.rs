//! Rivven Rolling Integration Tests
//!
//! This crate contains tests that exercise `rivven-rolling` against the real
//! clock and real threads. It is NOT published to crates.io.
//!
//! # Test Categories
//!
//! - **timing_window**: bucket aging and window bounds with wall-clock sleeps
//! - **stress**: concurrent writers and readers on shared counters and gauges
//!
//! # Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p rivven-integration-tests
//!
//! # Run specific test suite
//! cargo test -p rivven-integration-tests --test stress
//!
//! # Run with logging
//! RUST_LOG=trace cargo test -p rivven-integration-tests -- --nocapture
//! ```

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
