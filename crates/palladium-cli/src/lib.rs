//! Palladium CLI library.
//!
//! This crate provides the functionality behind the `palladium` binary:
//! input loading and the compile, load, inspect, verify, and formats
//! commands.

pub mod commands;
pub mod input;
