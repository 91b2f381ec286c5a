//! JDK discovery and compatibility checks.
//!
//! jarship does not install JDKs. It finds one (explicit config path,
//! `JAVA_HOME`, `PATH`, common OS locations) and refuses to build when that
//! JDK cannot produce the language level the manifest asks for.

pub mod compat;
pub mod jdk;
