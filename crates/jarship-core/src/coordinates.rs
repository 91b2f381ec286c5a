//! Maven coordinates of the project being published.

use std::fmt;

/// Suffix that marks a development (non-release) version.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// `groupId:artifactId:version` of a project or dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ProjectCoordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Parse a `group:artifact:version` string.
    pub fn parse(coord: &str) -> Option<Self> {
        let mut parts = coord.split(':');
        let group = parts.next().filter(|s| !s.is_empty())?;
        let artifact = parts.next().filter(|s| !s.is_empty())?;
        let version = parts.next().filter(|s| !s.is_empty())?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(group, artifact, version))
    }

    /// Whether the version ends with the literal `-SNAPSHOT`.
    pub fn is_snapshot(&self) -> bool {
        self.version.ends_with(SNAPSHOT_SUFFIX)
    }

    /// File name for an artifact of this project.
    ///
    /// `saxon-6-5-5`, `1.0.0`, `Some("sources")`, `jar` becomes
    /// `saxon-6-5-5-1.0.0-sources.jar`.
    pub fn file_name(&self, classifier: Option<&str>, extension: &str) -> String {
        match classifier {
            Some(c) => format!("{}-{}-{c}.{extension}", self.artifact_id, self.version),
            None => format!("{}-{}.{extension}", self.artifact_id, self.version),
        }
    }
}

impl fmt::Display for ProjectCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
