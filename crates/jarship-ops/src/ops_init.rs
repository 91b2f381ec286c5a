//! Operation: scaffold a project.

use std::path::{Path, PathBuf};

use jarship_core::properties::PROPERTIES_FILE;
use jarship_core::template::{render_manifest, TemplateContext, PROPERTIES_TEMPLATE};
use jarship_core::MANIFEST_FILE;
use jarship_util::errors::JarshipError;
use jarship_util::fs::ensure_dir;

/// Directories created next to the manifest.
const LAYOUT_DIRS: [&str; 3] = ["src/main/java", "src/main/resources", "src/doc"];

#[derive(Debug)]
pub struct InitResult {
    pub manifest: PathBuf,
    /// `None` when a properties file was already present.
    pub properties: Option<PathBuf>,
}

/// Write the reference `Jarship.toml` and a commented `jarship.properties`
/// into `dir`.
///
/// An existing manifest is only overwritten with `force`; an existing
/// properties file is never touched since it may hold credentials.
pub fn init(dir: &Path, force: bool) -> miette::Result<InitResult> {
    let manifest = dir.join(MANIFEST_FILE);
    if manifest.exists() && !force {
        return Err(JarshipError::Manifest {
            message: format!(
                "{MANIFEST_FILE} already exists in {} (use --force to overwrite)",
                dir.display()
            ),
        }
        .into());
    }

    ensure_dir(dir).map_err(JarshipError::Io)?;
    std::fs::write(&manifest, render_manifest(&TemplateContext::reference()))
        .map_err(JarshipError::Io)?;
    for sub in LAYOUT_DIRS {
        ensure_dir(&dir.join(sub)).map_err(JarshipError::Io)?;
    }

    let properties_path = dir.join(PROPERTIES_FILE);
    let properties = if properties_path.exists() {
        None
    } else {
        std::fs::write(&properties_path, PROPERTIES_TEMPLATE).map_err(JarshipError::Io)?;
        Some(properties_path)
    };

    Ok(InitResult {
        manifest,
        properties,
    })
}
