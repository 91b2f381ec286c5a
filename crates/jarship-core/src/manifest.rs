use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use jarship_util::errors::JarshipError;

use crate::coordinates::ProjectCoordinates;
use crate::duplicates::DuplicatesStrategy;

/// Sonatype OSSRH staging API.
pub const SONATYPE_NEXUS_URL: &str = "https://oss.sonatype.org/service/local/";

/// Sonatype OSSRH snapshot repository.
pub const SONATYPE_SNAPSHOT_URL: &str = "https://oss.sonatype.org/content/repositories/snapshots/";

/// The parsed representation of a `Jarship.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub package: PackageMetadata,

    #[serde(default)]
    pub java: JavaConfig,

    /// Runtime dependencies: `name = "group:artifact:version"`.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub archives: ArchiveConfig,

    #[serde(default)]
    pub resources: ResourceConfig,

    #[serde(default, rename = "license")]
    pub licenses: Vec<License>,

    #[serde(default, rename = "developer")]
    pub developers: Vec<Developer>,

    #[serde(default)]
    pub scm: Option<ScmConfig>,

    #[serde(default)]
    pub nexus: Option<NexusConfig>,
}

/// Package identity and descriptive metadata from `[package]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Language level, encoding and source layout from `[java]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JavaConfig {
    #[serde(default = "default_java_level", rename = "source-compatibility")]
    pub source_compatibility: String,
    #[serde(default = "default_java_level", rename = "target-compatibility")]
    pub target_compatibility: String,
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// JVM flags for the javadoc tool, passed as `-J<flag>`.
    #[serde(default = "default_javadoc_flags", rename = "javadoc-flags")]
    pub javadoc_flags: Vec<String>,
    #[serde(default, rename = "javadoc-fail-on-error")]
    pub javadoc_fail_on_error: bool,
    #[serde(default = "default_source_dirs", rename = "source-dirs")]
    pub source_dirs: Vec<String>,
    #[serde(default = "default_resource_dirs", rename = "resource-dirs")]
    pub resource_dirs: Vec<String>,
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            source_compatibility: default_java_level(),
            target_compatibility: default_java_level(),
            encoding: default_encoding(),
            javadoc_flags: default_javadoc_flags(),
            javadoc_fail_on_error: false,
            source_dirs: default_source_dirs(),
            resource_dirs: default_resource_dirs(),
        }
    }
}

fn default_java_level() -> String {
    "11".to_string()
}

fn default_encoding() -> String {
    "UTF-8".to_string()
}

/// English javadoc output regardless of the host locale.
fn default_javadoc_flags() -> Vec<String> {
    vec!["-Duser.language=en".to_string()]
}

fn default_source_dirs() -> Vec<String> {
    vec!["src/main/java".to_string()]
}

fn default_resource_dirs() -> Vec<String> {
    vec!["src/main/resources".to_string()]
}

/// Archive packaging settings from `[archives]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Directory packaged into the `doc` classifier archive.
    #[serde(default = "default_doc_dir", rename = "doc-dir")]
    pub doc_dir: String,
    #[serde(default = "DuplicatesStrategy::archive_default")]
    pub duplicates: DuplicatesStrategy,
    /// Glob patterns (relative to each input root) left out of every archive.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            doc_dir: default_doc_dir(),
            duplicates: DuplicatesStrategy::archive_default(),
            exclude: Vec::new(),
        }
    }
}

fn default_doc_dir() -> String {
    "src/doc".to_string()
}

/// Copy settings from `[resources]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    #[serde(default = "DuplicatesStrategy::copy_default")]
    pub duplicates: DuplicatesStrategy,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            duplicates: DuplicatesStrategy::copy_default(),
        }
    }
}

/// A `[[license]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub distribution: Option<String>,
}

/// A `[[developer]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Source control coordinates from `[scm]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScmConfig {
    #[serde(default)]
    pub connection: Option<String>,
    #[serde(default, rename = "developer-connection")]
    pub developer_connection: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Remote staging target from `[nexus]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NexusConfig {
    #[serde(default, rename = "staging-profile-id")]
    pub staging_profile_id: Option<String>,
    #[serde(default = "default_nexus_url", rename = "nexus-url")]
    pub nexus_url: String,
    #[serde(default = "default_snapshot_url", rename = "snapshot-url")]
    pub snapshot_url: String,
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            staging_profile_id: None,
            nexus_url: default_nexus_url(),
            snapshot_url: default_snapshot_url(),
        }
    }
}

/// Interpolate `${env:VAR}` in every string value, leaving keys alone.
fn resolve_env(value: &mut toml::Value) {
    match value {
        toml::Value::String(s) if s.contains("${env:") => {
            *s = crate::properties::interpolate(s, &BTreeMap::new());
        }
        toml::Value::Array(items) => items.iter_mut().for_each(resolve_env),
        toml::Value::Table(table) => table.iter_mut().for_each(|(_, v)| resolve_env(v)),
        _ => {}
    }
}

fn default_nexus_url() -> String {
    SONATYPE_NEXUS_URL.to_string()
}

fn default_snapshot_url() -> String {
    SONATYPE_SNAPSHOT_URL.to_string()
}

impl Manifest {
    /// Load and parse a `Jarship.toml` file from the given path.
    ///
    /// `${env:VAR}` references inside string values are resolved from the
    /// process environment after parsing, so substituted text is never
    /// read as TOML.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| JarshipError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let mut value: toml::Value = toml::from_str(&content).map_err(|e| JarshipError::Manifest {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?;
        resolve_env(&mut value);
        let manifest: Self = value.try_into().map_err(|e| JarshipError::Manifest {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse and validate a `Jarship.toml` from a string (no interpolation).
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        let manifest: Self = toml::from_str(content).map_err(|e| JarshipError::Manifest {
            message: format!("Failed to parse Jarship.toml: {e}"),
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), JarshipError> {
        for (field, value) in [
            ("group", &self.package.group),
            ("artifact", &self.package.artifact),
            ("version", &self.package.version),
        ] {
            if value.trim().is_empty() {
                return Err(JarshipError::Manifest {
                    message: format!("[package] {field} must not be empty"),
                });
            }
        }
        self.runtime_dependencies()?;
        Ok(())
    }

    /// Coordinates of the project itself.
    pub fn coordinates(&self) -> ProjectCoordinates {
        ProjectCoordinates::new(
            &self.package.group,
            &self.package.artifact,
            &self.package.version,
        )
    }

    /// Parsed `[dependencies]`, in declaration-name order.
    pub fn runtime_dependencies(&self) -> Result<Vec<ProjectCoordinates>, JarshipError> {
        self.dependencies
            .iter()
            .map(|(name, coord)| {
                ProjectCoordinates::parse(coord).ok_or_else(|| JarshipError::Manifest {
                    message: format!(
                        "dependency '{name}' must be group:artifact:version, got '{coord}'"
                    ),
                })
            })
            .collect()
    }

    /// The `[nexus]` section, or Sonatype OSSRH defaults.
    pub fn nexus_or_default(&self) -> NexusConfig {
        self.nexus.clone().unwrap_or_default()
    }
}
