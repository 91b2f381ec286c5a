//! Signing-key selection and signing activation.
//!
//! Three mutually exclusive ways of providing a key are recognised. They are
//! checked in a fixed order and the first one whose selector property is
//! present wins:
//!
//! | selector property       | source                          |
//! |-------------------------|---------------------------------|
//! | `signingKey`            | armored key held in memory      |
//! | `signing.keyId`         | key id in a secret key ring     |
//! | `signing.gnupg.keyName` | key known to an external `gpg`  |
//!
//! Presence is what matters: an empty value still selects its source, and
//! any problem with the key material surfaces when signing actually runs.

use std::path::PathBuf;

use crate::coordinates::ProjectCoordinates;
use crate::properties::ProjectProperties;

/// Selector properties in priority order.
pub const SIGNING_KEY_PROPERTIES: [&str; 3] =
    ["signingKey", "signing.keyId", "signing.gnupg.keyName"];

/// Where the signing key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningKeySource {
    /// ASCII-armored secret key passed via `signingKey`.
    InMemory {
        key: String,
        password: Option<String>,
        key_id: Option<String>,
    },
    /// Key id looked up in a secret key ring (`signing.secretKeyRingFile`).
    /// The ring file and `signing.password` are both required.
    KeyId {
        key_id: String,
        password: Option<String>,
        secret_key_ring_file: Option<PathBuf>,
    },
    /// Delegates to an installed `gpg` binary.
    GpgCommand {
        key_name: String,
        executable: String,
        home_dir: Option<PathBuf>,
        passphrase: Option<String>,
        use_legacy_gpg: bool,
    },
}

impl SigningKeySource {
    /// Pick the signing source from the project properties, if any.
    pub fn select(props: &ProjectProperties) -> Option<Self> {
        let selector = SIGNING_KEY_PROPERTIES
            .iter()
            .find(|name| props.has(name))?;
        let owned = |name: &str| props.get(name).map(str::to_string);

        let source = match *selector {
            "signingKey" => Self::InMemory {
                key: owned("signingKey").unwrap_or_default(),
                password: owned("signingPassword"),
                key_id: owned("signingKeyId"),
            },
            "signing.keyId" => Self::KeyId {
                key_id: owned("signing.keyId").unwrap_or_default(),
                password: owned("signing.password"),
                secret_key_ring_file: owned("signing.secretKeyRingFile").map(PathBuf::from),
            },
            _ => {
                let use_legacy_gpg = props.flag("signing.gnupg.useLegacyGpg");
                let default_exe = if use_legacy_gpg { "gpg" } else { "gpg2" };
                Self::GpgCommand {
                    key_name: owned("signing.gnupg.keyName").unwrap_or_default(),
                    executable: owned("signing.gnupg.executable")
                        .unwrap_or_else(|| default_exe.to_string()),
                    home_dir: owned("signing.gnupg.homeDir").map(PathBuf::from),
                    passphrase: owned("signing.gnupg.passphrase"),
                    use_legacy_gpg,
                }
            }
        };
        tracing::debug!("signing source selected by '{selector}'");
        Some(source)
    }

    /// The property that selected this source.
    pub fn selector(&self) -> &'static str {
        match self {
            Self::InMemory { .. } => SIGNING_KEY_PROPERTIES[0],
            Self::KeyId { .. } => SIGNING_KEY_PROPERTIES[1],
            Self::GpgCommand { .. } => SIGNING_KEY_PROPERTIES[2],
        }
    }

    /// Human-readable description with no secret material.
    pub fn describe(&self) -> String {
        match self {
            Self::InMemory { key_id, .. } => match key_id {
                Some(id) => format!("in-memory key {id}"),
                None => "in-memory key".to_string(),
            },
            Self::KeyId { key_id, .. } => format!("key ring key {key_id}"),
            Self::GpgCommand {
                key_name,
                executable,
                ..
            } => format!("{executable} key {key_name}"),
        }
    }
}

/// Whether signing runs for this invocation: a key source must be configured
/// and the version must not be a snapshot.
pub fn signing_enabled(source: Option<&SigningKeySource>, coords: &ProjectCoordinates) -> bool {
    source.is_some() && !coords.is_snapshot()
}

/// Outcome of the one-time signing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningDecision {
    Sign(SigningKeySource),
    SkipNoKey,
    SkipSnapshot,
}

impl SigningDecision {
    pub fn evaluate(props: &ProjectProperties, coords: &ProjectCoordinates) -> Self {
        let source = SigningKeySource::select(props);
        if !signing_enabled(source.as_ref(), coords) {
            return match source {
                None => Self::SkipNoKey,
                Some(_) => Self::SkipSnapshot,
            };
        }
        match source {
            Some(s) => Self::Sign(s),
            None => Self::SkipNoKey,
        }
    }

    pub fn source(&self) -> Option<&SigningKeySource> {
        match self {
            Self::Sign(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Sign(_))
    }
}
