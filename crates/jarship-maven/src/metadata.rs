//! `maven-metadata.xml` reading and writing.
//!
//! Artifact-level metadata lists versions (and is what Maven keeps as
//! `maven-metadata-local.xml` in a local repository). Version-level metadata
//! records the timestamped files of a `-SNAPSHOT` deployment.

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use jarship_core::coordinates::{ProjectCoordinates, SNAPSHOT_SUFFIX};
use jarship_util::errors::JarshipError;

use crate::xml::XmlDocument;

/// Artifact-level Maven metadata listing available versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MavenMetadata {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub latest: Option<String>,
    pub release: Option<String>,
    pub versions: Vec<String>,
    pub last_updated: Option<String>,
}

impl MavenMetadata {
    /// Add `version` (once) and make it the latest; non-snapshots also
    /// become the release.
    pub fn add_version(&mut self, version: &str) {
        if !self.versions.iter().any(|v| v == version) {
            self.versions.push(version.to_string());
        }
        self.latest = Some(version.to_string());
        if !version.ends_with(SNAPSHOT_SUFFIX) {
            self.release = Some(version.to_string());
        }
    }
}

/// One `<snapshotVersion>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotVersion {
    pub classifier: Option<String>,
    pub extension: String,
    pub value: String,
    pub updated: String,
}

/// Version-level snapshot metadata for timestamped SNAPSHOT deployments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotMetadata {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub timestamp: Option<String>,
    pub build_number: Option<u32>,
    pub last_updated: Option<String>,
    pub snapshot_versions: Vec<SnapshotVersion>,
}

impl SnapshotMetadata {
    /// Build a timestamped snapshot filename.
    ///
    /// For version `1.0-SNAPSHOT` with timestamp `20240101.120000` and build `5`,
    /// returns `artifactId-1.0-20240101.120000-5`.
    pub fn snapshot_base(&self, artifact_id: &str) -> Option<String> {
        let version = self.version.as_deref()?;
        let base = version.strip_suffix(SNAPSHOT_SUFFIX)?;
        let ts = self.timestamp.as_deref()?;
        let bn = self.build_number?;
        Some(format!("{artifact_id}-{base}-{ts}-{bn}"))
    }

    /// `1.0-20240101.120000-5`: the version part of the timestamped names.
    pub fn timestamped_version(&self) -> Option<String> {
        let version = self.version.as_deref()?;
        let base = version.strip_suffix(SNAPSHOT_SUFFIX)?;
        Some(format!("{base}-{}-{}", self.timestamp.as_deref()?, self.build_number?))
    }

    /// Metadata for the next deployment of `coords`, following `previous`
    /// (the metadata currently in the repository, if any).
    pub fn next_deployment(
        coords: &ProjectCoordinates,
        previous: Option<&SnapshotMetadata>,
        now: DateTime<Utc>,
    ) -> Self {
        let build_number = previous.and_then(|p| p.build_number).unwrap_or(0) + 1;
        Self {
            group_id: Some(coords.group_id.clone()),
            artifact_id: Some(coords.artifact_id.clone()),
            version: Some(coords.version.clone()),
            timestamp: Some(snapshot_timestamp(now)),
            build_number: Some(build_number),
            last_updated: Some(last_updated(now)),
            snapshot_versions: Vec::new(),
        }
    }

    /// Record a deployed file; `classifier`/`extension` as in its name.
    pub fn add_file(&mut self, classifier: Option<&str>, extension: &str) {
        let (Some(value), Some(updated)) = (self.timestamped_version(), self.last_updated.clone()) else {
            return;
        };
        self.snapshot_versions.push(SnapshotVersion {
            classifier: classifier.map(str::to_string),
            extension: extension.to_string(),
            value,
            updated,
        });
    }
}

/// `yyyyMMdd.HHmmss` in UTC, as used in snapshot file names.
pub fn snapshot_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d.%H%M%S").to_string()
}

/// `yyyyMMddHHmmss` in UTC, as used in `<lastUpdated>`.
pub fn last_updated(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

fn parse_err(what: &str, e: impl std::fmt::Display) -> miette::Report {
    JarshipError::Generic {
        message: format!("Failed to parse {what}: {e}"),
    }
    .into()
}

/// Parse an artifact-level `maven-metadata.xml` that lists available versions.
pub fn parse_metadata(xml: &str) -> miette::Result<MavenMetadata> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut meta = MavenMetadata::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                text_buf.clear();
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path.join(">");

                match ctx.as_str() {
                    "metadata>groupId" => meta.group_id = Some(text_buf.clone()),
                    "metadata>artifactId" => meta.artifact_id = Some(text_buf.clone()),
                    "metadata>versioning>latest" => meta.latest = Some(text_buf.clone()),
                    "metadata>versioning>release" => meta.release = Some(text_buf.clone()),
                    "metadata>versioning>versions>version" => {
                        meta.versions.push(text_buf.clone());
                    }
                    "metadata>versioning>lastUpdated" => {
                        meta.last_updated = Some(text_buf.clone());
                    }
                    _ => {}
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_err("maven-metadata.xml", e)),
            _ => {}
        }
    }

    Ok(meta)
}

/// Parse a version-level `maven-metadata.xml` for SNAPSHOT timestamp resolution.
pub fn parse_snapshot_metadata(xml: &str) -> miette::Result<SnapshotMetadata> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut meta = SnapshotMetadata::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();
    let mut current: Option<SnapshotVersion> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "snapshotVersion" {
                    current = Some(SnapshotVersion {
                        classifier: None,
                        extension: String::new(),
                        value: String::new(),
                        updated: String::new(),
                    });
                }
                path.push(name);
                text_buf.clear();
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path.join(">");

                match ctx.as_str() {
                    "metadata>groupId" => meta.group_id = Some(text_buf.clone()),
                    "metadata>artifactId" => meta.artifact_id = Some(text_buf.clone()),
                    "metadata>version" => meta.version = Some(text_buf.clone()),
                    "metadata>versioning>snapshot>timestamp" => {
                        meta.timestamp = Some(text_buf.clone());
                    }
                    "metadata>versioning>snapshot>buildNumber" => {
                        meta.build_number = text_buf.parse().ok();
                    }
                    "metadata>versioning>lastUpdated" => {
                        meta.last_updated = Some(text_buf.clone());
                    }
                    "metadata>versioning>snapshotVersions>snapshotVersion" => {
                        meta.snapshot_versions.extend(current.take());
                    }
                    _ => {
                        if let Some(sv) = current.as_mut() {
                            match path.last().map(String::as_str) {
                                Some("classifier") => sv.classifier = Some(text_buf.clone()),
                                Some("extension") => sv.extension = text_buf.clone(),
                                Some("value") => sv.value = text_buf.clone(),
                                Some("updated") => sv.updated = text_buf.clone(),
                                _ => {}
                            }
                        }
                    }
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_err("snapshot metadata", e)),
            _ => {}
        }
    }

    Ok(meta)
}

/// Render artifact-level metadata.
pub fn write_metadata(meta: &MavenMetadata) -> miette::Result<String> {
    let mut doc = XmlDocument::new()?;
    doc.start("metadata")?;
    doc.optional("groupId", meta.group_id.as_deref())?;
    doc.optional("artifactId", meta.artifact_id.as_deref())?;
    doc.start("versioning")?;
    doc.optional("latest", meta.latest.as_deref())?;
    doc.optional("release", meta.release.as_deref())?;
    doc.start("versions")?;
    for v in &meta.versions {
        doc.element("version", v)?;
    }
    doc.end("versions")?;
    doc.optional("lastUpdated", meta.last_updated.as_deref())?;
    doc.end("versioning")?;
    doc.end("metadata")?;
    doc.finish()
}

/// Render version-level snapshot metadata.
pub fn write_snapshot_metadata(meta: &SnapshotMetadata) -> miette::Result<String> {
    let mut doc = XmlDocument::new()?;
    doc.start_with("metadata", &[("modelVersion", "1.1.0")])?;
    doc.optional("groupId", meta.group_id.as_deref())?;
    doc.optional("artifactId", meta.artifact_id.as_deref())?;
    doc.optional("version", meta.version.as_deref())?;
    doc.start("versioning")?;
    doc.start("snapshot")?;
    doc.optional("timestamp", meta.timestamp.as_deref())?;
    if let Some(n) = meta.build_number {
        doc.element("buildNumber", &n.to_string())?;
    }
    doc.end("snapshot")?;
    doc.optional("lastUpdated", meta.last_updated.as_deref())?;
    if !meta.snapshot_versions.is_empty() {
        doc.start("snapshotVersions")?;
        for sv in &meta.snapshot_versions {
            doc.start("snapshotVersion")?;
            doc.optional("classifier", sv.classifier.as_deref())?;
            doc.element("extension", &sv.extension)?;
            doc.element("value", &sv.value)?;
            doc.element("updated", &sv.updated)?;
            doc.end("snapshotVersion")?;
        }
        doc.end("snapshotVersions")?;
    }
    doc.end("versioning")?;
    doc.end("metadata")?;
    doc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_snapshot_meta() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>tokyo.northside</groupId>
  <artifactId>saxon-6-5-5</artifactId>
  <version>1.0.1-SNAPSHOT</version>
  <versioning>
    <snapshot>
      <timestamp>20240615.143022</timestamp>
      <buildNumber>42</buildNumber>
    </snapshot>
    <lastUpdated>20240615143022</lastUpdated>
    <snapshotVersions>
      <snapshotVersion>
        <classifier>sources</classifier>
        <extension>jar</extension>
        <value>1.0.1-20240615.143022-42</value>
        <updated>20240615143022</updated>
      </snapshotVersion>
    </snapshotVersions>
  </versioning>
</metadata>"#;
        let meta = parse_snapshot_metadata(xml).unwrap();
        assert_eq!(meta.timestamp.as_deref(), Some("20240615.143022"));
        assert_eq!(meta.build_number, Some(42));
        assert_eq!(meta.snapshot_versions.len(), 1);
        assert_eq!(meta.snapshot_versions[0].classifier.as_deref(), Some("sources"));

        let base = meta.snapshot_base("saxon-6-5-5").unwrap();
        assert_eq!(base, "saxon-6-5-5-1.0.1-20240615.143022-42");
    }

    #[test]
    fn snapshot_base_returns_none_for_non_snapshot() {
        let meta = SnapshotMetadata {
            version: Some("1.0.0".to_string()),
            timestamp: Some("20240101.000000".to_string()),
            build_number: Some(1),
            ..Default::default()
        };
        assert!(meta.snapshot_base("lib").is_none());
    }

    #[test]
    fn next_deployment_increments_build_number() {
        let coords = ProjectCoordinates::new("tokyo.northside", "saxon-6-5-5", "1.0.1-SNAPSHOT");
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 22).unwrap();

        let first = SnapshotMetadata::next_deployment(&coords, None, now);
        assert_eq!(first.build_number, Some(1));
        assert_eq!(first.timestamp.as_deref(), Some("20240615.143022"));
        assert_eq!(first.last_updated.as_deref(), Some("20240615143022"));

        let second = SnapshotMetadata::next_deployment(&coords, Some(&first), now);
        assert_eq!(second.build_number, Some(2));
        assert_eq!(
            second.timestamped_version().as_deref(),
            Some("1.0.1-20240615.143022-2")
        );
    }

    #[test]
    fn written_snapshot_metadata_reads_back() {
        let coords = ProjectCoordinates::new("tokyo.northside", "saxon-6-5-5", "1.0.1-SNAPSHOT");
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let mut meta = SnapshotMetadata::next_deployment(&coords, None, now);
        meta.add_file(None, "jar");
        meta.add_file(Some("doc"), "jar");
        meta.add_file(None, "pom");

        let xml = write_snapshot_metadata(&meta).unwrap();
        assert!(xml.contains("<buildNumber>1</buildNumber>"));
        assert_eq!(parse_snapshot_metadata(&xml).unwrap(), meta);
    }

    #[test]
    fn add_version_tracks_release_and_latest() {
        let mut meta = MavenMetadata::default();
        meta.add_version("1.0.0");
        meta.add_version("1.0.1-SNAPSHOT");
        meta.add_version("1.0.0");
        assert_eq!(meta.versions, vec!["1.0.0", "1.0.1-SNAPSHOT"]);
        assert_eq!(meta.release.as_deref(), Some("1.0.0"));
        assert_eq!(meta.latest.as_deref(), Some("1.0.0"));

        let xml = write_metadata(&meta).unwrap();
        assert_eq!(parse_metadata(&xml).unwrap(), meta);
    }
}
