//! Maven repository protocol: repository layout, POM and metadata writing,
//! checksum sidecars, dependency download, uploads, Nexus staging and
//! `gpg` signing.

pub mod auth;
pub mod checksum;
pub mod download;
pub mod local;
pub mod metadata;
pub mod pom;
pub mod publish;
pub mod repository;
pub mod sign;
pub mod staging;
pub mod upload;
mod xml;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("jarship/", env!("CARGO_PKG_VERSION"));
