//! Operation: remove build outputs.

use std::path::Path;

use jarship_util::errors::JarshipError;

/// Remove the project's `build/` directory.
pub fn clean(project_dir: &Path) -> miette::Result<CleanResult> {
    let build_dir = project_dir.join("build");
    if !build_dir.exists() {
        return Ok(CleanResult::NothingToClean);
    }
    std::fs::remove_dir_all(&build_dir).map_err(JarshipError::Io)?;
    tracing::debug!("removed {}", build_dir.display());
    Ok(CleanResult::Cleaned)
}

/// Result of a clean operation.
#[derive(Debug, PartialEq, Eq)]
pub enum CleanResult {
    Cleaned,
    NothingToClean,
}
