//! Deploying a publication's files into a remote Maven repository.
//!
//! Every file is followed by its `.md5`, `.sha1`, `.sha256` and `.sha512`
//! sidecars. Snapshot versions are deployed under timestamped names and the
//! version-level `maven-metadata.xml` is rewritten with the next build
//! number.

use chrono::{DateTime, Utc};
use reqwest::Client;

use jarship_core::coordinates::ProjectCoordinates;
use jarship_core::publication::PublishedArtifact;
use jarship_util::errors::JarshipError;
use jarship_util::progress;

use crate::checksum::ChecksumAlgorithm;
use crate::download;
use crate::metadata::{self, MavenMetadata, SnapshotMetadata};
use crate::repository::MavenRepository;
use crate::upload;

/// Outcome of a deployment.
#[derive(Debug, Clone, Default)]
pub struct DeployReport {
    /// URLs of uploaded publication files, sidecars excluded.
    pub uploaded: Vec<String>,
    pub snapshot: Option<SnapshotMetadata>,
}

pub struct RemotePublisher<'a> {
    client: &'a Client,
    repository: &'a MavenRepository,
    coords: &'a ProjectCoordinates,
}

impl<'a> RemotePublisher<'a> {
    pub fn new(client: &'a Client, repository: &'a MavenRepository, coords: &'a ProjectCoordinates) -> Self {
        Self {
            client,
            repository,
            coords,
        }
    }

    /// Upload `files` under their release names.
    pub async fn deploy_release(&self, files: &[PublishedArtifact]) -> miette::Result<DeployReport> {
        let pb = progress::progress_bar(files.len() as u64, "Uploading");
        let mut report = DeployReport::default();
        for file in files {
            let name = self
                .coords
                .file_name(file.classifier.as_deref(), &file.extension);
            let url = self.repository.file_url(self.coords, &name);
            self.upload_with_checksums(&url, file).await?;
            report.uploaded.push(url);
            pb.inc(1);
        }
        pb.finish_and_clear();
        Ok(report)
    }

    /// Upload `files` as the next snapshot build and update the metadata.
    pub async fn deploy_snapshot(
        &self,
        files: &[PublishedArtifact],
        now: DateTime<Utc>,
    ) -> miette::Result<DeployReport> {
        let meta_url = self.repository.snapshot_metadata_url(self.coords);
        let previous = match download::download_text(self.client, self.repository, &meta_url).await? {
            Some(xml) => Some(metadata::parse_snapshot_metadata(&xml)?),
            None => None,
        };
        let mut meta = SnapshotMetadata::next_deployment(self.coords, previous.as_ref(), now);
        let Some(base) = meta.snapshot_base(&self.coords.artifact_id) else {
            return Err(JarshipError::Publish {
                message: format!("{} is not a snapshot version", self.coords.version),
            }
            .into());
        };

        let pb = progress::progress_bar(files.len() as u64, "Uploading");
        let mut report = DeployReport::default();
        for file in files {
            let name = match &file.classifier {
                Some(c) => format!("{base}-{c}.{}", file.extension),
                None => format!("{base}.{}", file.extension),
            };
            let url = self.repository.file_url(self.coords, &name);
            self.upload_with_checksums(&url, file).await?;
            if !file.extension.ends_with(".asc") {
                meta.add_file(file.classifier.as_deref(), &file.extension);
            }
            report.uploaded.push(url);
            pb.inc(1);
        }
        pb.finish_and_clear();

        let xml = metadata::write_snapshot_metadata(&meta)?;
        self.upload_text_with_checksums(&meta_url, xml.into_bytes()).await?;
        self.update_artifact_metadata(now).await?;

        report.snapshot = Some(meta);
        Ok(report)
    }

    async fn update_artifact_metadata(&self, now: DateTime<Utc>) -> miette::Result<()> {
        let url = self.repository.metadata_url(self.coords);
        let mut meta = match download::download_text(self.client, self.repository, &url).await? {
            Some(xml) => metadata::parse_metadata(&xml)?,
            None => MavenMetadata::default(),
        };
        meta.group_id = Some(self.coords.group_id.clone());
        meta.artifact_id = Some(self.coords.artifact_id.clone());
        meta.add_version(&self.coords.version);
        meta.last_updated = Some(metadata::last_updated(now));
        let xml = metadata::write_metadata(&meta)?;
        self.upload_text_with_checksums(&url, xml.into_bytes()).await
    }

    async fn upload_with_checksums(&self, url: &str, file: &PublishedArtifact) -> miette::Result<()> {
        let data = tokio::fs::read(&file.path).await.map_err(JarshipError::Io)?;
        tracing::debug!("uploading {} to {url}", file.path.display());
        self.upload_text_with_checksums(url, data).await
    }

    async fn upload_text_with_checksums(&self, url: &str, data: Vec<u8>) -> miette::Result<()> {
        let sums: Vec<(ChecksumAlgorithm, String)> = ChecksumAlgorithm::PUBLISHED
            .into_iter()
            .map(|algo| (algo, algo.digest_bytes(&data)))
            .collect();
        let creds = self.repository.credentials.as_ref();
        upload::upload_bytes(self.client, creds, url, data).await?;
        for (algo, digest) in sums {
            let sidecar = format!("{url}.{}", algo.extension());
            upload::upload_bytes(self.client, creds, &sidecar, digest.into_bytes()).await?;
        }
        Ok(())
    }
}
