//! Shared utilities for jarship.
//!
//! This crate provides cross-cutting concerns used by all other jarship crates:
//! error types, filesystem helpers, checksums, process spawning, and terminal
//! status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod progress;
