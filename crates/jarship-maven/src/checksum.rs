//! Checksum sidecars: generated for every published file, verified for
//! every downloaded dependency.

use reqwest::Client;

use jarship_util::errors::JarshipError;
use jarship_util::hash;

use crate::download;
use crate::repository::MavenRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl ChecksumAlgorithm {
    /// Sidecars uploaded next to every published file.
    pub const PUBLISHED: [ChecksumAlgorithm; 4] = [Self::Md5, Self::Sha1, Self::Sha256, Self::Sha512];

    /// Order in which sidecars are tried when verifying a download.
    const VERIFY_ORDER: [ChecksumAlgorithm; 3] = [Self::Sha256, Self::Sha1, Self::Md5];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha512 => "SHA-512",
        }
    }

    pub fn digest_bytes(self, data: &[u8]) -> String {
        match self {
            Self::Md5 => hash::md5_bytes(data),
            Self::Sha1 => hash::sha1_bytes(data),
            Self::Sha256 => hash::sha256_bytes(data),
            Self::Sha512 => hash::sha512_bytes(data),
        }
    }
}

/// Verify the checksum of downloaded data against sidecar files from the repo.
///
/// Tries SHA-256 first, falls back to SHA-1, then MD5.
/// Logs a warning if no checksum sidecar is available.
pub async fn verify(
    client: &Client,
    repo: &MavenRepository,
    file_url: &str,
    data: &[u8],
) -> miette::Result<()> {
    for algo in ChecksumAlgorithm::VERIFY_ORDER {
        let url = format!("{file_url}.{}", algo.extension());
        if let Some(expected) = download::download_text(client, repo, &url).await? {
            return check_bytes(algo, data, &expected, file_url);
        }
    }
    tracing::warn!("No checksum sidecar found for {file_url}");
    Ok(())
}

/// Compare `data` against the contents of a sidecar file.
pub fn check_bytes(algo: ChecksumAlgorithm, data: &[u8], sidecar: &str, url: &str) -> miette::Result<()> {
    let expected = extract_hash(sidecar);
    let actual = algo.digest_bytes(data);
    if actual.eq_ignore_ascii_case(&expected) {
        tracing::debug!("{} ok for {url}", algo.label());
        Ok(())
    } else {
        Err(JarshipError::Network {
            message: format!(
                "{} mismatch for {url}: expected {expected}, got {actual}",
                algo.label()
            ),
        }
        .into())
    }
}

/// Extract the hex hash from a checksum file.
///
/// Maven checksum files may contain just the hash, or `hash  filename`.
fn extract_hash(content: &str) -> String {
    content.split_whitespace().next().unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_hash_with_filename() {
        assert_eq!(extract_hash("abc123  my-lib-1.0.jar\n"), "abc123");
        assert_eq!(extract_hash("abc123\n"), "abc123");
    }

    #[test]
    fn check_detects_mismatch() {
        let md5 = "5eb63bbbe01eeed093cb22bb8f5acdc3";
        assert!(check_bytes(ChecksumAlgorithm::Md5, b"hello world", md5, "u").is_ok());
        assert!(check_bytes(ChecksumAlgorithm::Md5, b"hello there", md5, "u").is_err());
    }
}
