//! Remote repository abstraction: URL layout and the Nexus upload target.

use jarship_core::coordinates::ProjectCoordinates;
use jarship_core::manifest::NexusConfig;
use jarship_core::properties::ProjectProperties;

use crate::auth::Credentials;

/// Maven Central base URL.
pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2";

/// A Maven repository reachable over HTTP, with optional credentials.
#[derive(Debug, Clone)]
pub struct MavenRepository {
    pub name: String,
    pub url: String,
    pub credentials: Option<Credentials>,
}

impl MavenRepository {
    pub fn new(name: &str, url: &str, credentials: Option<Credentials>) -> Self {
        Self {
            name: name.to_string(),
            url: url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Construct the default Maven Central repository.
    pub fn maven_central() -> Self {
        Self::new("maven-central", MAVEN_CENTRAL_URL, None)
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `tokyo.northside:saxon-6-5-5:1.0.0` becomes
    /// `tokyo/northside/saxon-6-5-5/1.0.0`
    pub fn coordinate_path(coords: &ProjectCoordinates) -> String {
        format!(
            "{}/{}/{}",
            coords.group_id.replace('.', "/"),
            coords.artifact_id,
            coords.version
        )
    }

    /// Full URL to a specific file within the repository.
    pub fn file_url(&self, coords: &ProjectCoordinates, filename: &str) -> String {
        format!("{}/{}/{}", self.url, Self::coordinate_path(coords), filename)
    }

    /// URL to the JAR file for a given coordinate.
    pub fn jar_url(&self, coords: &ProjectCoordinates, classifier: Option<&str>) -> String {
        self.file_url(coords, &coords.file_name(classifier, "jar"))
    }

    /// URL to the `maven-metadata.xml` at the version level (SNAPSHOT resolution).
    pub fn snapshot_metadata_url(&self, coords: &ProjectCoordinates) -> String {
        self.file_url(coords, "maven-metadata.xml")
    }

    /// URL to the artifact-level `maven-metadata.xml` (version listing).
    pub fn metadata_url(&self, coords: &ProjectCoordinates) -> String {
        format!(
            "{}/{}/{}/maven-metadata.xml",
            self.url,
            coords.group_id.replace('.', "/"),
            coords.artifact_id
        )
    }

    pub fn has_auth(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Where `publish` sends a publication: a Nexus staging profile for releases
/// and a snapshot repository for `-SNAPSHOT` versions.
#[derive(Debug, Clone)]
pub struct NexusTarget {
    pub staging_profile_id: Option<String>,
    /// Base of the Nexus REST API, always ending in `/`.
    pub nexus_url: String,
    pub snapshot_url: String,
    pub credentials: Option<Credentials>,
}

impl NexusTarget {
    /// Bind the configured endpoints; credentials are attached only when
    /// both `sonatypeUsername` and `sonatypePassword` are set.
    pub fn configure(config: &NexusConfig, props: &ProjectProperties) -> Self {
        let credentials = Credentials::from_properties(props);
        if credentials.is_none() {
            tracing::debug!("no repository credentials bound for {}", config.nexus_url);
        }
        let mut nexus_url = config.nexus_url.clone();
        if !nexus_url.ends_with('/') {
            nexus_url.push('/');
        }
        Self {
            staging_profile_id: config.staging_profile_id.clone(),
            nexus_url,
            snapshot_url: config.snapshot_url.clone(),
            credentials,
        }
    }

    pub fn snapshot_repository(&self) -> MavenRepository {
        MavenRepository::new("sonatype-snapshots", &self.snapshot_url, self.credentials.clone())
    }

    /// Upload endpoint for an already-open staging repository.
    pub fn staging_deploy_repository(&self, staged_repository_id: &str) -> MavenRepository {
        MavenRepository::new(
            "sonatype",
            &format!("{}staging/deployByRepositoryId/{staged_repository_id}", self.nexus_url),
            self.credentials.clone(),
        )
    }
}
