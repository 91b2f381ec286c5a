//! Downloading from Maven repositories, and resolution of the project's
//! direct dependencies.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;

use jarship_core::coordinates::ProjectCoordinates;
use jarship_util::errors::JarshipError;

use crate::auth;
use crate::checksum;
use crate::local::LocalRepository;
use crate::repository::MavenRepository;

pub(crate) const MAX_RETRIES: u32 = 3;
pub(crate) const RETRY_DELAY: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build a shared reqwest client for repository traffic.
pub fn build_client() -> miette::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(crate::USER_AGENT)
        .build()
        .map_err(|e| {
            JarshipError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            }
            .into()
        })
}

/// Download raw bytes from a URL, with authentication and retries.
///
/// Returns `Ok(None)` for 404 (artifact not found in this repo).
pub async fn download_bytes(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
) -> miette::Result<Option<Vec<u8>>> {
    let mut last_err = String::new();

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            tokio::time::sleep(RETRY_DELAY * attempt).await;
        }

        let req = auth::apply_auth(client.get(url), repo.credentials.as_ref());

        match req.send().await {
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if status.is_server_error() {
                    last_err = format!("HTTP {status} from {url}");
                    continue;
                }
                if !status.is_success() {
                    return Err(JarshipError::Network {
                        message: format!("HTTP {status} fetching {url}"),
                    }
                    .into());
                }

                let bytes = resp.bytes().await.map_err(|e| JarshipError::Network {
                    message: format!("Failed to read response from {url}: {e}"),
                })?;
                return Ok(Some(bytes.to_vec()));
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                last_err = format!("{e}");
                continue;
            }
            Err(e) => {
                return Err(JarshipError::Network {
                    message: format!("Request to {url} failed: {e}"),
                }
                .into());
            }
        }
    }

    Err(JarshipError::Network {
        message: format!("Failed after {MAX_RETRIES} retries for {url}: {last_err}"),
    }
    .into())
}

/// Download a text file (metadata, checksum sidecar).
pub async fn download_text(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
) -> miette::Result<Option<String>> {
    match download_bytes(client, repo, url).await? {
        Some(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).to_string())),
        None => Ok(None),
    }
}

/// Where dependency jars are looked up and stored.
pub struct DependencyResolver<'a> {
    pub client: &'a Client,
    pub remote: &'a MavenRepository,
    /// Consulted first; never written to.
    pub local: &'a LocalRepository,
    /// Downloads are stored here.
    pub cache: &'a LocalRepository,
}

impl DependencyResolver<'_> {
    /// Jar paths for `deps`, in order. Only the named coordinates are
    /// fetched; their own dependencies are not.
    pub async fn resolve(&self, deps: &[ProjectCoordinates]) -> miette::Result<Vec<PathBuf>> {
        let mut jars = Vec::with_capacity(deps.len());
        for dep in deps {
            jars.push(self.resolve_one(dep).await?);
        }
        Ok(jars)
    }

    async fn resolve_one(&self, dep: &ProjectCoordinates) -> miette::Result<PathBuf> {
        if let Some(path) = self.local.get_jar(dep, None) {
            tracing::debug!("{dep} found in {}", self.local.root().display());
            return Ok(path);
        }
        if let Some(path) = self.cache.get_jar(dep, None) {
            tracing::debug!("{dep} found in cache");
            return Ok(path);
        }

        let url = self.remote.jar_url(dep, None);
        jarship_util::progress::status("Downloading", &dep.to_string());
        let Some(bytes) = download_bytes(self.client, self.remote, &url).await? else {
            return Err(JarshipError::Network {
                message: format!("{dep} not found in {}", self.remote.name),
            }
            .into());
        };
        checksum::verify(self.client, self.remote, &url, &bytes).await?;
        self.cache.put(dep, &dep.file_name(None, "jar"), &bytes)
    }
}
