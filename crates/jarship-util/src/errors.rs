use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all jarship operations.
#[derive(Debug, Error, Diagnostic)]
pub enum JarshipError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Jarship.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Jarship.toml for syntax errors"))]
    Manifest { message: String },

    /// The JDK cannot satisfy the requested language level, or is missing.
    #[error("Toolchain error: {message}")]
    #[diagnostic(help("Set JAVA_HOME or [toolchain] jdk in ~/.jarship/config.toml"))]
    Toolchain { message: String },

    /// javac rejected the sources.
    #[error("Compilation failed: {message}")]
    Compilation { message: String },

    /// Writing a jar or copying files failed.
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// Signing key material was configured but could not be used.
    #[error("Signing failed: {message}")]
    #[diagnostic(help("Check the signing properties in jarship.properties"))]
    Signing { message: String },

    /// Network request, download or upload failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The remote repository rejected the publication.
    #[error("Publish failed: {message}")]
    Publish { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type JarshipResult<T> = miette::Result<T>;
