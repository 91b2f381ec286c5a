//! What to do when two inputs map to the same output path.
//!
//! Copy operations (resource processing, installing into the local
//! repository) default to [`DuplicatesStrategy::Warn`]; archive packaging
//! defaults to [`DuplicatesStrategy::Exclude`].

use std::fmt;

use serde::{Deserialize, Serialize};

use jarship_util::errors::JarshipError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatesStrategy {
    /// Later input replaces the earlier one silently.
    Include,
    /// The first input wins; later ones are dropped silently.
    Exclude,
    /// Later input replaces the earlier one and a warning is logged.
    Warn,
    /// A duplicate aborts the operation.
    Fail,
}

/// Outcome for a single duplicate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateAction {
    KeepExisting,
    Replace,
}

impl DuplicatesStrategy {
    /// Default for copying files into a directory.
    pub fn copy_default() -> Self {
        Self::Warn
    }

    /// Default for packaging files into an archive.
    pub fn archive_default() -> Self {
        Self::Exclude
    }

    /// Decide what to do with a second input for `path` in `context`
    /// (e.g. the archive name).
    pub fn resolve(self, context: &str, path: &str) -> Result<DuplicateAction, JarshipError> {
        match self {
            Self::Include => Ok(DuplicateAction::Replace),
            Self::Exclude => {
                tracing::debug!("{context}: excluding duplicate {path}");
                Ok(DuplicateAction::KeepExisting)
            }
            Self::Warn => {
                tracing::warn!("{context}: duplicate path {path}, later copy wins");
                Ok(DuplicateAction::Replace)
            }
            Self::Fail => Err(JarshipError::Archive {
                message: format!("{context}: duplicate path {path}"),
            }),
        }
    }
}

impl fmt::Display for DuplicatesStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::Warn => "warn",
            Self::Fail => "fail",
        };
        f.write_str(name)
    }
}
