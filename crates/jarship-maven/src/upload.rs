//! HTTP PUT uploads into a Maven repository layout.

use reqwest::Client;

use jarship_util::errors::JarshipError;

use crate::auth::{self, Credentials};
use crate::download::{MAX_RETRIES, RETRY_DELAY};

/// PUT `data` to `url`. Transport failures and 5xx responses are retried;
/// any other non-2xx response is fatal.
pub async fn upload_bytes(
    client: &Client,
    credentials: Option<&Credentials>,
    url: &str,
    data: Vec<u8>,
) -> miette::Result<()> {
    let mut last_err = String::new();

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            tokio::time::sleep(RETRY_DELAY * attempt).await;
        }

        let req = auth::apply_auth(client.put(url), credentials).body(data.clone());

        match req.send().await {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    tracing::debug!("uploaded {url} ({status})");
                    return Ok(());
                }
                if status.is_server_error() {
                    last_err = format!("HTTP {status} from {url}");
                    continue;
                }
                let body = resp.text().await.unwrap_or_default();
                return Err(JarshipError::Publish {
                    message: format!("HTTP {status} uploading {url}{}", detail(&body)),
                }
                .into());
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                last_err = format!("{e}");
                continue;
            }
            Err(e) => {
                return Err(JarshipError::Network {
                    message: format!("Upload to {url} failed: {e}"),
                }
                .into());
            }
        }
    }

    Err(JarshipError::Publish {
        message: format!("Failed after {MAX_RETRIES} retries for {url}: {last_err}"),
    }
    .into())
}

fn detail(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        let short: String = body.chars().take(200).collect();
        format!(": {short}")
    }
}
