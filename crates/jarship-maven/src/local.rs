//! File-system Maven repositories: `~/.m2/repository` and the jarship
//! download cache share the same layout.

use std::fs;
use std::path::{Path, PathBuf};

use jarship_core::coordinates::ProjectCoordinates;
use jarship_core::duplicates::{DuplicateAction, DuplicatesStrategy};
use jarship_util::errors::JarshipError;

use crate::metadata::{self, MavenMetadata};

/// Metadata file name Maven uses for locally installed artifacts.
pub const LOCAL_METADATA_FILE: &str = "maven-metadata-local.xml";

#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding all versions of an artifact.
    pub fn artifact_root(&self, coords: &ProjectCoordinates) -> PathBuf {
        self.root
            .join(coords.group_id.replace('.', "/"))
            .join(&coords.artifact_id)
    }

    /// Path within the repository for a given coordinate.
    pub fn artifact_dir(&self, coords: &ProjectCoordinates) -> PathBuf {
        self.artifact_root(coords).join(&coords.version)
    }

    /// Check if a JAR is present and return its path.
    pub fn get_jar(&self, coords: &ProjectCoordinates, classifier: Option<&str>) -> Option<PathBuf> {
        let path = self
            .artifact_dir(coords)
            .join(coords.file_name(classifier, "jar"));
        path.is_file().then_some(path)
    }

    /// Store data in the repository, creating directories as needed.
    pub fn put(&self, coords: &ProjectCoordinates, filename: &str, data: &[u8]) -> miette::Result<PathBuf> {
        let dir = self.artifact_dir(coords);
        fs::create_dir_all(&dir).map_err(JarshipError::Io)?;
        let path = dir.join(filename);
        fs::write(&path, data).map_err(JarshipError::Io)?;
        Ok(path)
    }

    /// Copy `source` into the artifact directory as `filename`.
    ///
    /// An existing file with different content is a duplicate and handled
    /// by `strategy`. Returns the destination path.
    pub fn install_file(
        &self,
        coords: &ProjectCoordinates,
        source: &Path,
        filename: &str,
        strategy: DuplicatesStrategy,
    ) -> miette::Result<PathBuf> {
        let dir = self.artifact_dir(coords);
        fs::create_dir_all(&dir).map_err(JarshipError::Io)?;
        let dest = dir.join(filename);
        if dest.is_file() && !same_contents(source, &dest)? {
            let context = format!("publishToMavenLocal {coords}");
            if strategy.resolve(&context, filename)? == DuplicateAction::KeepExisting {
                return Ok(dest);
            }
        }
        fs::copy(source, &dest).map_err(JarshipError::Io)?;
        Ok(dest)
    }

    /// Record `coords.version` in the artifact-level `maven-metadata-local.xml`.
    pub fn record_version(&self, coords: &ProjectCoordinates, last_updated: &str) -> miette::Result<PathBuf> {
        let path = self.artifact_root(coords).join(LOCAL_METADATA_FILE);
        let mut meta = if path.is_file() {
            let xml = fs::read_to_string(&path).map_err(JarshipError::Io)?;
            metadata::parse_metadata(&xml)?
        } else {
            MavenMetadata::default()
        };
        meta.group_id = Some(coords.group_id.clone());
        meta.artifact_id = Some(coords.artifact_id.clone());
        meta.add_version(&coords.version);
        meta.last_updated = Some(last_updated.to_string());

        let xml = metadata::write_metadata(&meta)?;
        fs::create_dir_all(self.artifact_root(coords)).map_err(JarshipError::Io)?;
        fs::write(&path, xml).map_err(JarshipError::Io)?;
        Ok(path)
    }
}

fn same_contents(a: &Path, b: &Path) -> miette::Result<bool> {
    let a = fs::read(a).map_err(JarshipError::Io)?;
    let b = fs::read(b).map_err(JarshipError::Io)?;
    Ok(a == b)
}
