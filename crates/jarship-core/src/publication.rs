//! The `mavenJava` publication: the assembled archives plus POM metadata.
//!
//! A [`PublicationDescriptor`] can only be built from [`AssembledArchives`],
//! so the archives necessarily exist before the publication does. It has no
//! mutators; one is composed per invocation and read from then on.

use std::path::{Path, PathBuf};

use jarship_util::errors::JarshipError;

use crate::coordinates::ProjectCoordinates;
use crate::manifest::{Developer, License, Manifest, ScmConfig};

/// Paths of the archives produced by `assemble`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledArchives {
    pub jar: PathBuf,
    pub sources_jar: PathBuf,
    pub javadoc_jar: PathBuf,
    pub doc_jar: PathBuf,
}

/// One file of a publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArtifact {
    pub path: PathBuf,
    pub classifier: Option<String>,
    pub extension: String,
}

impl PublishedArtifact {
    fn jar(path: &Path, classifier: Option<&str>) -> Self {
        Self {
            path: path.to_path_buf(),
            classifier: classifier.map(str::to_string),
            extension: "jar".to_string(),
        }
    }
}

/// Descriptive metadata written into the POM.
#[derive(Debug, Clone, PartialEq)]
pub struct PomMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub licenses: Vec<License>,
    pub developers: Vec<Developer>,
    pub scm: Option<ScmConfig>,
    pub dependencies: Vec<ProjectCoordinates>,
}

#[derive(Debug, Clone)]
pub struct PublicationDescriptor {
    name: String,
    coordinates: ProjectCoordinates,
    pom: PomMetadata,
    artifacts: Vec<PublishedArtifact>,
}

impl PublicationDescriptor {
    /// Bind the primary jar, its sources/javadoc/doc archives and the
    /// manifest metadata into the `mavenJava` publication.
    pub fn compose(manifest: &Manifest, archives: AssembledArchives) -> miette::Result<Self> {
        let artifacts = vec![
            PublishedArtifact::jar(&archives.jar, None),
            PublishedArtifact::jar(&archives.sources_jar, Some("sources")),
            PublishedArtifact::jar(&archives.javadoc_jar, Some("javadoc")),
            PublishedArtifact::jar(&archives.doc_jar, Some("doc")),
        ];
        for artifact in &artifacts {
            if !artifact.path.is_file() {
                return Err(JarshipError::Archive {
                    message: format!(
                        "{} has not been assembled",
                        artifact.path.display()
                    ),
                }
                .into());
            }
        }

        let pom = PomMetadata {
            name: manifest.package.name.clone(),
            description: manifest.package.description.clone(),
            url: manifest.package.url.clone(),
            licenses: manifest.licenses.clone(),
            developers: manifest.developers.clone(),
            scm: manifest.scm.clone(),
            dependencies: manifest.runtime_dependencies()?,
        };

        Ok(Self {
            name: crate::PUBLICATION_NAME.to_string(),
            coordinates: manifest.coordinates(),
            pom,
            artifacts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinates(&self) -> &ProjectCoordinates {
        &self.coordinates
    }

    pub fn pom(&self) -> &PomMetadata {
        &self.pom
    }

    /// The archives in publication order: primary, sources, javadoc, doc.
    pub fn artifacts(&self) -> &[PublishedArtifact] {
        &self.artifacts
    }

    /// Describe the POM file at `path` as an artifact of this publication.
    pub fn pom_artifact(&self, path: &Path) -> PublishedArtifact {
        PublishedArtifact {
            path: path.to_path_buf(),
            classifier: None,
            extension: "pom".to_string(),
        }
    }

    /// Repository file name for `artifact`, e.g. `saxon-6-5-5-1.0.0-doc.jar`.
    pub fn remote_file_name(&self, artifact: &PublishedArtifact) -> String {
        self.coordinates
            .file_name(artifact.classifier.as_deref(), &artifact.extension)
    }
}
