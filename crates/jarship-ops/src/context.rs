//! Per-invocation project context.

use std::path::{Path, PathBuf};

use jarship_core::config::GlobalConfig;
use jarship_core::coordinates::ProjectCoordinates;
use jarship_core::manifest::Manifest;
use jarship_core::properties::ProjectProperties;
use jarship_core::signing::SigningDecision;
use jarship_core::{MANIFEST_FILE, PUBLICATION_NAME};
use jarship_util::errors::JarshipError;
use jarship_util::fs::find_ancestor_with;

/// Output locations under `build/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    pub build_dir: PathBuf,
    pub classes_dir: PathBuf,
    pub resources_dir: PathBuf,
    pub libs_dir: PathBuf,
    pub javadoc_dir: PathBuf,
    pub tmp_dir: PathBuf,
    pub publication_dir: PathBuf,
    pub reports_dir: PathBuf,
}

impl BuildLayout {
    pub fn new(project_dir: &Path) -> Self {
        let build_dir = project_dir.join("build");
        Self {
            classes_dir: build_dir.join("classes").join("java").join("main"),
            resources_dir: build_dir.join("resources").join("main"),
            libs_dir: build_dir.join("libs"),
            javadoc_dir: build_dir.join("docs").join("javadoc"),
            tmp_dir: build_dir.join("tmp"),
            publication_dir: build_dir.join("publications").join(PUBLICATION_NAME),
            reports_dir: build_dir.join("reports"),
            build_dir,
        }
    }

    /// `build/libs/<artifact>-<version>[-<classifier>].jar`
    pub fn jar_path(&self, coords: &ProjectCoordinates, classifier: Option<&str>) -> PathBuf {
        self.libs_dir.join(coords.file_name(classifier, "jar"))
    }

    pub fn pom_path(&self) -> PathBuf {
        self.publication_dir.join("pom-default.xml")
    }
}

/// Everything loaded once per invocation.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub project_dir: PathBuf,
    pub manifest: Manifest,
    pub properties: ProjectProperties,
    pub config: GlobalConfig,
    pub layout: BuildLayout,
    /// Whether (and how) this invocation signs. Decided once, here.
    pub signing: SigningDecision,
}

impl ProjectContext {
    /// Find the project containing `start` and load it with the user's
    /// global configuration.
    pub fn discover(start: &Path, cli_properties: &[(String, String)]) -> miette::Result<Self> {
        let project_dir = find_project_root(start)?;
        Self::load(&project_dir, cli_properties, GlobalConfig::load()?)
    }

    pub fn load(
        project_dir: &Path,
        cli_properties: &[(String, String)],
        config: GlobalConfig,
    ) -> miette::Result<Self> {
        let manifest = Manifest::from_path(&project_dir.join(MANIFEST_FILE))?;
        let properties = ProjectProperties::load(project_dir, cli_properties)?;
        Ok(Self::from_parts(project_dir, manifest, properties, config))
    }

    pub fn from_parts(
        project_dir: &Path,
        manifest: Manifest,
        properties: ProjectProperties,
        config: GlobalConfig,
    ) -> Self {
        let signing = SigningDecision::evaluate(&properties, &manifest.coordinates());
        tracing::debug!("signing: {}", signing_summary(&signing));
        Self {
            project_dir: project_dir.to_path_buf(),
            layout: BuildLayout::new(project_dir),
            manifest,
            properties,
            config,
            signing,
        }
    }

    pub fn coordinates(&self) -> ProjectCoordinates {
        self.manifest.coordinates()
    }

    /// Resolve a manifest-relative directory.
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_dir.join(relative)
    }

    pub fn source_dirs(&self) -> Vec<PathBuf> {
        self.manifest
            .java
            .source_dirs
            .iter()
            .map(|d| self.project_path(d))
            .collect()
    }

    pub fn resource_dirs(&self) -> Vec<PathBuf> {
        self.manifest
            .java
            .resource_dirs
            .iter()
            .map(|d| self.project_path(d))
            .collect()
    }
}

/// Loggable summary of the signing decision with no key material.
pub fn signing_summary(decision: &SigningDecision) -> String {
    match decision {
        SigningDecision::Sign(source) => format!("sign with {}", source.describe()),
        SigningDecision::SkipNoKey => "skip (no signing key configured)".to_string(),
        SigningDecision::SkipSnapshot => "skip (snapshot version)".to_string(),
    }
}

/// Directory containing the nearest `Jarship.toml` at or above `start`.
pub fn find_project_root(start: &Path) -> miette::Result<PathBuf> {
    find_ancestor_with(start, MANIFEST_FILE).ok_or_else(|| {
        JarshipError::Manifest {
            message: format!(
                "Could not find {MANIFEST_FILE} in {} or any parent directory",
                start.display()
            ),
        }
        .into()
    })
}
