//! Palladium End-to-End Test Infrastructure
//!
//! This crate provides integration tests for round-trip critical flows:
//!
//! - Compile: scene graph -> interchange document
//! - Load: interchange document -> scene graph
//! - CLI: snapshot and model files through the `palladium` commands
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p palladium-tests
//! ```

pub mod fixtures;
pub mod harness;

pub use harness::TestHarness;
