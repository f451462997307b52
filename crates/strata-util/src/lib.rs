//! Shared utilities for the Strata module manager.
//!
//! This crate provides cross-cutting concerns used by all other Strata crates:
//! error types, filesystem helpers and terminal status lines.

pub mod errors;
pub mod fs;
pub mod progress;
