//! Core data types for jarship.
//!
//! This crate defines what a jarship project is: the `Jarship.toml` manifest,
//! layered project properties, Maven coordinates, the signing-key selection
//! and gating rules, the duplicate-file policy, the task graph and the
//! immutable publication descriptor.
//!
//! This crate is intentionally free of async code and network I/O.

/// Name of the project manifest file.
pub const MANIFEST_FILE: &str = "Jarship.toml";

/// Name of the publication every project produces.
pub const PUBLICATION_NAME: &str = "mavenJava";

pub mod config;
pub mod coordinates;
pub mod duplicates;
pub mod manifest;
pub mod properties;
pub mod publication;
pub mod signing;
pub mod task;
pub mod template;
