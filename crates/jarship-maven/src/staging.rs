//! Nexus 2 staging REST client.
//!
//! A release is uploaded into a staging repository opened on the project's
//! staging profile. Closing validates it; releasing promotes it to the
//! release repository and drops the staging copy.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use jarship_util::errors::JarshipError;

use crate::auth;
use crate::repository::NexusTarget;

#[derive(Debug, Serialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Serialize)]
struct StartRequest<'a> {
    description: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartResponse {
    staged_repository_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkRequest<'a> {
    staged_repository_ids: Vec<&'a str>,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_drop_after_release: Option<bool>,
}

/// State of a staging repository as reported by Nexus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagingRepository {
    pub repository_id: String,
    /// `open`, `closed`, `released`, ...
    #[serde(rename = "type")]
    pub state: String,
    #[serde(default)]
    pub transitioning: bool,
}

/// How long to wait for a repository to finish closing.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            attempts: 60,
        }
    }
}

pub struct StagingClient<'a> {
    client: &'a Client,
    target: &'a NexusTarget,
    poll: PollSettings,
}

impl<'a> StagingClient<'a> {
    pub fn new(client: &'a Client, target: &'a NexusTarget) -> Self {
        Self {
            client,
            target,
            poll: PollSettings::default(),
        }
    }

    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.target.nexus_url)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> miette::Result<reqwest::Response> {
        let url = self.url(path);
        let req = auth::apply_auth(self.client.post(&url), self.target.credentials.as_ref())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body);
        let resp = req.send().await.map_err(|e| JarshipError::Network {
            message: format!("Request to {url} failed: {e}"),
        })?;
        check_status(resp, &url).await
    }

    /// Open a staging repository on the configured profile.
    pub async fn start(&self, description: &str) -> miette::Result<String> {
        let Some(profile) = self.target.staging_profile_id.as_deref() else {
            return Err(JarshipError::Publish {
                message: "no staging profile id configured ([nexus] staging-profile-id)".to_string(),
            }
            .into());
        };
        let resp = self
            .post(
                &format!("staging/profiles/{profile}/start"),
                &Envelope {
                    data: StartRequest { description },
                },
            )
            .await?;
        let body: DataEnvelope<StartResponse> = resp.json().await.map_err(|e| JarshipError::Publish {
            message: format!("Unexpected response opening staging repository: {e}"),
        })?;
        tracing::info!("opened staging repository {}", body.data.staged_repository_id);
        Ok(body.data.staged_repository_id)
    }

    pub async fn close(&self, repository_id: &str, description: &str) -> miette::Result<()> {
        self.post(
            "staging/bulk/close",
            &Envelope {
                data: BulkRequest {
                    staged_repository_ids: vec![repository_id],
                    description,
                    auto_drop_after_release: None,
                },
            },
        )
        .await?;
        Ok(())
    }

    pub async fn release(&self, repository_id: &str, description: &str) -> miette::Result<()> {
        self.post(
            "staging/bulk/promote",
            &Envelope {
                data: BulkRequest {
                    staged_repository_ids: vec![repository_id],
                    description,
                    auto_drop_after_release: Some(true),
                },
            },
        )
        .await?;
        Ok(())
    }

    pub async fn repository(&self, repository_id: &str) -> miette::Result<StagingRepository> {
        let url = self.url(&format!("staging/repository/{repository_id}"));
        let req = auth::apply_auth(self.client.get(&url), self.target.credentials.as_ref())
            .header(reqwest::header::ACCEPT, "application/json");
        let resp = req.send().await.map_err(|e| JarshipError::Network {
            message: format!("Request to {url} failed: {e}"),
        })?;
        let resp = check_status(resp, &url).await?;
        resp.json().await.map_err(|e| {
            JarshipError::Publish {
                message: format!("Unexpected staging repository state from {url}: {e}"),
            }
            .into()
        })
    }

    /// Poll until `repository_id` is closed and no longer transitioning.
    pub async fn wait_until_closed(&self, repository_id: &str) -> miette::Result<StagingRepository> {
        for attempt in 0..self.poll.attempts {
            if attempt > 0 {
                tokio::time::sleep(self.poll.interval).await;
            }
            let repo = self.repository(repository_id).await?;
            if !repo.transitioning && repo.state == "closed" {
                return Ok(repo);
            }
            if !repo.transitioning && repo.state != "open" {
                return Err(JarshipError::Publish {
                    message: format!("staging repository {repository_id} is '{}'", repo.state),
                }
                .into());
            }
            tracing::debug!("{repository_id} is {} (transitioning: {})", repo.state, repo.transitioning);
        }
        Err(JarshipError::Publish {
            message: format!(
                "staging repository {repository_id} did not close after {} checks",
                self.poll.attempts
            ),
        }
        .into())
    }
}

async fn check_status(resp: reqwest::Response, url: &str) -> miette::Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let hint = if status == reqwest::StatusCode::UNAUTHORIZED {
        " (set sonatypeUsername and sonatypePassword)"
    } else {
        ""
    };
    Err(JarshipError::Publish {
        message: format!("HTTP {status} from {url}{hint}: {}", body.trim()),
    }
    .into())
}
